//! Persisted form of [`GameState`].
//!
//! The stored envelope is `{ "state": { ... }, "version": n }`. Sets are written as arrays of
//! `"<category>-<question>"` keys, and reading is lenient: a key field that is missing or not an
//! array becomes an empty set instead of failing the whole snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::question::{CATEGORY_COUNT, GameData, QUESTIONS_PER_CATEGORY, Question, QuestionKey};
use crate::state::{ActiveQuestion, GameState};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PersistedSnapshot {
    pub state: PersistedState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub current_question: Option<Question>,
    /// Board position of `current_question`. Older snapshots do not carry it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_key"
    )]
    pub current_question_key: Option<QuestionKey>,
    #[serde(default)]
    pub game_data: Option<GameData>,
    #[serde(default = "started_by_default")]
    pub game_started: bool,
    #[serde(default)]
    pub game_completed: bool,
    #[serde(default, deserialize_with = "lenient_keys")]
    pub answered_questions: Vec<QuestionKey>,
    #[serde(default, deserialize_with = "lenient_keys")]
    pub correct_answers: Vec<QuestionKey>,
    #[serde(default, deserialize_with = "lenient_keys")]
    pub incorrect_answers: Vec<QuestionKey>,
}

fn started_by_default() -> bool {
    true
}

fn lenient_keys<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<QuestionKey>, D::Error> {
    let value = Value::deserialize(deserializer)?;

    let Value::Array(items) = value else {
        log::warn!("stored key list is not an array; treating it as empty");
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| {
            let key = item.as_str().and_then(|text| text.parse().ok());
            if key.is_none() {
                log::warn!("skipping unreadable stored question key {item}");
            }
            key
        })
        .collect())
}

fn lenient_key<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<QuestionKey>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|text| text.parse().ok()))
}

/// Converts live state into its persisted form.
pub fn encode(state: &GameState, version: u32) -> PersistedSnapshot {
    let keys = |set: &BTreeSet<QuestionKey>| -> Vec<QuestionKey> { set.iter().copied().collect() };

    PersistedSnapshot {
        state: PersistedState {
            score: state.score,
            current_question: state
                .current_question
                .as_ref()
                .map(|active| active.question.clone()),
            current_question_key: state.current_question.as_ref().map(|active| active.key),
            game_data: state.game_data.clone(),
            game_started: state.game_started,
            game_completed: state.game_completed,
            answered_questions: keys(&state.answered_questions),
            correct_answers: keys(&state.correct_answers),
            incorrect_answers: keys(&state.incorrect_answers),
        },
        version: Some(version),
    }
}

/// Whether `key` names a cell on the board, and in `data` when a bank is loaded.
fn on_board(key: QuestionKey, data: Option<&GameData>) -> bool {
    key.category < CATEGORY_COUNT
        && key.question < QUESTIONS_PER_CATEGORY
        && data.is_none_or(|data| data.question(key).is_some())
}

fn board_keys(keys: Vec<QuestionKey>, data: Option<&GameData>) -> BTreeSet<QuestionKey> {
    keys.into_iter()
        .filter(|key| {
            let keep = on_board(*key, data);
            if !keep {
                log::warn!("dropping stored question key {key} outside the board");
            }
            keep
        })
        .collect()
}

/// Pairs the stored current question with its board position.
///
/// A stored key is used only if it is on the board and, with a bank loaded, names the same
/// question. Otherwise the position is looked up in the bank by value.
fn resolve_current(
    question: Question,
    stored_key: Option<QuestionKey>,
    data: Option<&GameData>,
) -> Option<ActiveQuestion> {
    let trusted = stored_key.filter(|key| {
        on_board(*key, data)
            && data.is_none_or(|data| data.question(*key) == Some(&question))
    });

    let key = trusted.or_else(|| data.and_then(|data| data.key_of(&question)));

    match key {
        Some(key) => Some(ActiveQuestion { key, question }),
        None => {
            log::warn!("dropping stored current question with no board position");
            None
        }
    }
}

/// Rebuilds live state from a snapshot, repairing any broken set invariants.
///
/// Keys outside the 3×3 board, or missing from the stored bank, are dropped before the sets
/// are reconciled.
pub fn decode(snapshot: PersistedSnapshot) -> GameState {
    let PersistedState {
        score,
        current_question,
        current_question_key,
        game_data,
        game_started,
        game_completed: _,
        answered_questions,
        correct_answers,
        incorrect_answers,
    } = snapshot.state;

    let data = game_data.as_ref();
    let current_question = current_question
        .and_then(|question| resolve_current(question, current_question_key, data));
    let answered_questions = board_keys(answered_questions, data);
    let correct_answers = board_keys(correct_answers, data);
    let incorrect_answers = board_keys(incorrect_answers, data);

    let mut state = GameState {
        score,
        current_question,
        game_data,
        game_started,
        game_completed: false,
        answered_questions,
        correct_answers,
        incorrect_answers,
    };
    state.normalize();
    state
}

/// Parses stored text. Anything unreadable counts as no prior state.
pub fn parse_snapshot(text: &str) -> Option<PersistedSnapshot> {
    match serde_json::from_str(text) {
        Ok(snapshot) => Some(snapshot),
        Err(error) => {
            log::warn!("ignoring unreadable stored game state: {error}");
            None
        }
    }
}

pub fn render_snapshot(snapshot: &PersistedSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}
