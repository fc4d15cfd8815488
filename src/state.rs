use std::collections::BTreeSet;

use crate::question::{GameData, Question, QuestionKey, TOTAL_QUESTIONS};

/// The question currently on screen, with the board position it was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestion {
    pub key: QuestionKey,
    pub question: Question,
}

/// Progress of one game session.
///
/// Every key in `correct_answers` or `incorrect_answers` is also in `answered_questions`,
/// and no key is in both outcome sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub current_question: Option<ActiveQuestion>,
    pub game_data: Option<GameData>,
    pub game_started: bool,
    pub game_completed: bool,
    pub answered_questions: BTreeSet<QuestionKey>,
    pub correct_answers: BTreeSet<QuestionKey>,
    pub incorrect_answers: BTreeSet<QuestionKey>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            current_question: None,
            game_data: None,
            game_started: true,
            game_completed: false,
            answered_questions: BTreeSet::new(),
            correct_answers: BTreeSet::new(),
            incorrect_answers: BTreeSet::new(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_answered(&self, key: QuestionKey) -> bool {
        self.answered_questions.contains(&key)
    }

    /// `Some(true)` for a correct answer, `Some(false)` for an incorrect one.
    pub fn outcome(&self, key: QuestionKey) -> Option<bool> {
        if self.correct_answers.contains(&key) {
            Some(true)
        } else if self.incorrect_answers.contains(&key) {
            Some(false)
        } else {
            None
        }
    }

    /// Records the outcome for `key`. Returns `false` if the key was already answered.
    pub(crate) fn record(&mut self, key: QuestionKey, is_correct: bool, value: u32) -> bool {
        if !self.answered_questions.insert(key) {
            return false;
        }

        if is_correct {
            self.correct_answers.insert(key);
            self.score = self.score.saturating_add(value);
        } else {
            self.incorrect_answers.insert(key);
        }

        self.refresh_completion();
        true
    }

    /// Returns score, sets and flags to their starting values, keeping the loaded bank.
    pub(crate) fn reset_progress(&mut self) {
        let game_data = self.game_data.take();
        *self = Self {
            game_data,
            ..Self::default()
        };
    }

    pub(crate) fn refresh_completion(&mut self) {
        self.game_completed = self.answered_questions.len() == TOTAL_QUESTIONS;
    }

    /// Restores the set invariants on state that did not come from [`GameState::record`].
    ///
    /// Outcome keys are added to the answered set, a key in both outcome sets counts as correct,
    /// and answered keys without an outcome are dropped.
    pub(crate) fn normalize(&mut self) {
        let correct = &self.correct_answers;
        self.incorrect_answers.retain(|key| !correct.contains(key));

        self.answered_questions = self
            .correct_answers
            .union(&self.incorrect_answers)
            .copied()
            .collect();

        self.refresh_completion();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_game_data;

    #[test]
    fn starts_empty_and_started() {
        let state = GameState::new();

        assert_eq!(state.score, 0);
        assert!(state.game_started);
        assert!(!state.game_completed);
        assert!(state.answered_questions.is_empty());
    }

    #[test]
    fn record_refuses_second_outcome_for_same_key() {
        let mut state = GameState::new();
        let key = QuestionKey::new(0, 0);

        assert!(state.record(key, true, 100));
        assert!(!state.record(key, false, 100));

        assert_eq!(state.score, 100);
        assert_eq!(state.outcome(key), Some(true));
        assert!(state.incorrect_answers.is_empty());
    }

    #[test]
    fn reset_progress_keeps_bank() {
        let mut state = GameState {
            game_data: Some(demo_game_data()),
            ..GameState::new()
        };
        state.record(QuestionKey::new(1, 1), true, 200);
        state.game_started = false;

        state.reset_progress();

        assert_eq!(state.score, 0);
        assert!(state.game_started);
        assert!(state.answered_questions.is_empty());
        assert_eq!(state.game_data, Some(demo_game_data()));
    }

    #[test]
    fn normalize_repairs_inconsistent_sets() {
        let mut state = GameState::new();
        state.answered_questions.insert(QuestionKey::new(2, 2));
        state.correct_answers.insert(QuestionKey::new(0, 0));
        state.correct_answers.insert(QuestionKey::new(0, 1));
        state.incorrect_answers.insert(QuestionKey::new(0, 1));
        state.incorrect_answers.insert(QuestionKey::new(1, 0));

        state.normalize();

        let answered: Vec<String> = state
            .answered_questions
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(answered, vec!["0-0", "0-1", "1-0"]);
        assert_eq!(state.outcome(QuestionKey::new(0, 1)), Some(true));
        assert_eq!(
            state.correct_answers.len() + state.incorrect_answers.len(),
            state.answered_questions.len()
        );
    }
}
