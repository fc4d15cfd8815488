pub mod bank;
pub mod config;
pub mod demo;
pub mod question;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod timer;

#[cfg(target_arch = "wasm32")]
mod web;

pub use bank::{BankLoadError, load_bank, parse_bank};
pub use config::{GameConfig, ScoreCeiling};
pub use demo::{DEMO_MAX_SCORE, demo_game_data};
pub use question::{
    BankError, CATEGORY_COUNT, Category, GameData, KeyParseError, OPTION_COUNT,
    QUESTIONS_PER_CATEGORY, Question, QuestionKey, TOTAL_QUESTIONS,
};
pub use snapshot::{PersistedSnapshot, PersistedState};
pub use state::{ActiveQuestion, GameState};
pub use stats::{CellStatus, GameSummary};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::GameStore;
pub use timer::{AutoClose, AutoCloseTicket};
