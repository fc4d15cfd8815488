use crate::config::GameConfig;
use crate::question::{GameData, QuestionKey};
use crate::snapshot::{decode, encode, parse_snapshot, render_snapshot};
use crate::state::{ActiveQuestion, GameState};
use crate::stats::{CellStatus, GameSummary, board_rows};
use crate::storage::SessionStorage;

/// Owner of the game state. Every change goes through here and is mirrored into storage.
///
/// Invalid calls (selecting an answered or missing cell, answering with nothing open) are
/// silent no-ops. Storage failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct GameStore<S: SessionStorage> {
    state: GameState,
    storage: S,
    config: GameConfig,
}

impl<S: SessionStorage> GameStore<S> {
    /// Starts a fresh session without looking at anything already in storage.
    pub fn new(storage: S, config: GameConfig) -> Self {
        Self {
            state: GameState::new(),
            storage,
            config,
        }
    }

    /// Starts a session from the snapshot in storage, or fresh if there is none.
    pub fn restore(storage: S, config: GameConfig) -> Self {
        let state = match storage.get_item(&config.storage_key) {
            Ok(Some(text)) => parse_snapshot(&text).map(decode).unwrap_or_default(),
            Ok(None) => GameState::new(),
            Err(error) => {
                log::warn!("could not read stored game state: {error}");
                GameState::new()
            }
        };

        if !state.answered_questions.is_empty() {
            log::info!(
                "restored game with {} answered questions and score {}",
                state.answered_questions.len(),
                state.score
            );
        }

        Self {
            state,
            storage,
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn current_question(&self) -> Option<&ActiveQuestion> {
        self.state.current_question.as_ref()
    }

    /// Stores the bank as given. Use [`crate::parse_bank`] or [`GameData::validate`] to check it first.
    pub fn set_game_data(&mut self, data: GameData) {
        self.state.game_data = Some(data);
        self.persist();
    }

    pub fn start_game(&mut self) {
        self.state.game_started = true;
        self.persist();
    }

    /// Opens the question at the given cell.
    ///
    /// Does nothing when no bank is loaded, the indices are outside the bank, or the cell is
    /// already answered.
    pub fn select_question(&mut self, category_index: usize, question_index: usize) {
        let key = QuestionKey::new(category_index, question_index);

        let Some(data) = &self.state.game_data else {
            log::debug!("ignoring selection of {key}: no question bank loaded");
            return;
        };

        let Some(question) = data.question(key) else {
            log::debug!("ignoring selection of {key}: not on the board");
            return;
        };

        if self.state.is_answered(key) {
            log::debug!("ignoring selection of {key}: already answered");
            return;
        }

        self.state.current_question = Some(ActiveQuestion {
            key,
            question: question.clone(),
        });
        self.persist();
    }

    /// Records the outcome for the open question. The question stays open until
    /// [`GameStore::close_question`] is called.
    pub fn answer_question(&mut self, is_correct: bool) {
        if self.state.game_data.is_none() {
            log::debug!("ignoring answer: no question bank loaded");
            return;
        }

        let Some(active) = &self.state.current_question else {
            log::debug!("ignoring answer: no question is open");
            return;
        };

        let (key, value) = (active.key, active.question.value);
        if !self.state.record(key, is_correct, value) {
            log::debug!("ignoring answer for {key}: already answered");
            return;
        }

        self.persist();
    }

    /// Answers the open question with the option at `option_index`.
    ///
    /// Returns whether the option was correct, or `None` if no question is open.
    pub fn submit_option(&mut self, option_index: usize) -> Option<bool> {
        let is_correct = self.current_question()?.question.is_correct(option_index);
        self.answer_question(is_correct);
        Some(is_correct)
    }

    pub fn close_question(&mut self) {
        self.state.current_question = None;
        self.persist();
    }

    /// Clears the stored snapshot and starts over with the same bank.
    pub fn reset_game(&mut self) {
        if let Err(error) = self.storage.remove_item(&self.config.storage_key) {
            log::warn!("could not clear stored game state: {error}");
        }

        self.state.reset_progress();
        log::info!("game reset");
        self.persist();
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::compute(&self.state, self.config.score_ceiling)
    }

    pub fn board(&self) -> Vec<Vec<(QuestionKey, CellStatus)>> {
        board_rows(&self.state)
    }

    fn persist(&mut self) {
        let snapshot = encode(&self.state, self.config.snapshot_version);

        let text = match render_snapshot(&snapshot) {
            Ok(text) => text,
            Err(error) => {
                log::error!("failed to serialize game state: {error}");
                return;
            }
        };

        if let Err(error) = self.storage.set_item(&self.config.storage_key, &text) {
            log::error!("failed to save game state: {error}");
        }
    }
}
