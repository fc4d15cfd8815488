use crate::config::ScoreCeiling;
use crate::question::{CATEGORY_COUNT, QUESTIONS_PER_CATEGORY, QuestionKey, TOTAL_QUESTIONS};
use crate::state::GameState;

/// End-of-game figures. Recomputed from state on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub max_possible_score: u32,
    /// `score` as a rounded percentage of `max_possible_score`.
    pub score_percentage: u32,
    pub questions_answered: usize,
    pub total_questions: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    /// Rounded percentage of answered questions that were correct. Zero before any answer.
    pub accuracy: u32,
    pub categories_completed: usize,
    pub total_categories: usize,
}

impl GameSummary {
    pub fn compute(state: &GameState, ceiling: ScoreCeiling) -> Self {
        let max_possible_score = ceiling.resolve(state.game_data.as_ref());
        let questions_answered = state.answered_questions.len();
        let correct_count = state.correct_answers.len();

        Self {
            score: state.score,
            max_possible_score,
            score_percentage: rounded_percentage(
                u64::from(state.score),
                u64::from(max_possible_score),
            ),
            questions_answered,
            total_questions: TOTAL_QUESTIONS,
            correct_count,
            incorrect_count: state.incorrect_answers.len(),
            accuracy: rounded_percentage(correct_count as u64, questions_answered as u64),
            categories_completed: categories_completed(state),
            total_categories: CATEGORY_COUNT,
        }
    }
}

/// `round(100 * part / whole)` with halves rounded up; zero when `whole` is zero.
pub fn rounded_percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }

    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Number of loaded categories whose every question has been answered.
pub fn categories_completed(state: &GameState) -> usize {
    let Some(data) = &state.game_data else {
        return 0;
    };

    (0..data.categories.len())
        .filter(|category| {
            (0..QUESTIONS_PER_CATEGORY)
                .all(|question| state.is_answered(QuestionKey::new(*category, question)))
        })
        .count()
}

/// What a board cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Open { value: u32 },
    Correct,
    Incorrect,
}

pub fn cell_status(state: &GameState, key: QuestionKey) -> Option<CellStatus> {
    match state.outcome(key) {
        Some(true) => Some(CellStatus::Correct),
        Some(false) => Some(CellStatus::Incorrect),
        None => state
            .game_data
            .as_ref()?
            .question(key)
            .map(|question| CellStatus::Open {
                value: question.value,
            }),
    }
}

/// Cells laid out row by row: row `n` holds question `n` of every category.
pub fn board_rows(state: &GameState) -> Vec<Vec<(QuestionKey, CellStatus)>> {
    let Some(data) = &state.game_data else {
        return Vec::new();
    };

    let rows = data
        .categories
        .iter()
        .map(|category| category.questions.len())
        .max()
        .unwrap_or(0);

    (0..rows)
        .map(|question| {
            (0..data.categories.len())
                .filter_map(|category| {
                    let key = QuestionKey::new(category, question);
                    cell_status(state, key).map(|status| (key, status))
                })
                .collect()
        })
        .collect()
}
