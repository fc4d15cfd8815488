use jeopardy::{
    CATEGORY_COUNT, CellStatus, GameConfig, GameStore, MemoryStorage, QUESTIONS_PER_CATEGORY,
    QuestionKey, SessionStorage, demo_game_data,
};
use serde_json::Value;

const KEY: &str = "jeopardy-game-storage";

fn stored_state(storage: &MemoryStorage) -> Value {
    let text = storage
        .get_item(KEY)
        .expect("memory storage never fails")
        .expect("a snapshot should be stored");
    let value: Value = serde_json::from_str(&text).expect("snapshot is JSON");
    value["state"].clone()
}

fn played_store() -> GameStore<MemoryStorage> {
    let mut store = GameStore::new(MemoryStorage::new(), GameConfig::default());
    store.set_game_data(demo_game_data());
    for (category, question, correct) in [(0, 0, true), (1, 1, false), (2, 2, true)] {
        store.select_question(category, question);
        store.answer_question(correct);
        store.close_question();
    }
    store.select_question(1, 0);
    store
}

fn restore_from(state: Value) -> GameStore<MemoryStorage> {
    let text = serde_json::json!({ "state": state, "version": 0 }).to_string();
    let mut storage = MemoryStorage::new();
    storage.set_item(KEY, &text).expect("memory storage never fails");
    GameStore::restore(storage, GameConfig::default())
}

fn demo_bank_json() -> Value {
    serde_json::to_value(demo_game_data()).expect("bank should serialize")
}

fn keys(category: usize, count: usize) -> Value {
    (0..count)
        .map(|question| Value::from(format!("{category}-{question}")))
        .collect()
}

fn assert_keys_on_board(store: &GameStore<MemoryStorage>) {
    for key in &store.state().answered_questions {
        assert!(
            key.category < CATEGORY_COUNT && key.question < QUESTIONS_PER_CATEGORY,
            "{key} is not a board cell"
        );
    }
}

#[test]
fn reload_restores_progress() {
    let store = played_store();
    let before = store.state().clone();

    let restored = GameStore::restore(store.into_storage(), GameConfig::default());

    assert_eq!(restored.state(), &before);
    assert_eq!(
        restored.current_question().map(|active| active.key),
        Some(QuestionKey::new(1, 0))
    );
}

#[test]
fn every_change_is_mirrored() {
    let mut store = played_store();
    store.answer_question(true);

    let state = stored_state(store.storage());
    assert_eq!(state["score"], 500);
    assert_eq!(
        state["answeredQuestions"],
        serde_json::json!(["0-0", "1-0", "1-1", "2-2"])
    );
    assert_eq!(state["gameStarted"], true);
    assert_eq!(state["currentQuestion"]["value"], 100);
}

#[test]
fn reset_leaves_empty_snapshot() {
    let mut store = played_store();
    store.reset_game();

    let state = stored_state(store.storage());
    assert_eq!(state["score"], 0);
    assert_eq!(state["answeredQuestions"], serde_json::json!([]));
    assert_eq!(state["correctAnswers"], serde_json::json!([]));
    assert_eq!(state["incorrectAnswers"], serde_json::json!([]));
    assert!(state["currentQuestion"].is_null());
    assert!(state["gameData"].is_object());

    let restored = GameStore::restore(store.into_storage(), GameConfig::default());
    assert!(restored.state().answered_questions.is_empty());
    assert_eq!(restored.state().game_data, Some(demo_game_data()));
}

#[test]
fn malformed_sets_load_as_empty() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            KEY,
            r#"{"state": {"answeredQuestions": "not-an-array", "score": 300}, "version": 0}"#,
        )
        .expect("memory storage never fails");

    let store = GameStore::restore(storage, GameConfig::default());

    assert!(store.state().answered_questions.is_empty());
    assert_eq!(store.state().score, 300);
}

#[test]
fn unreadable_storage_starts_fresh() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(KEY, "{{{ definitely not json")
        .expect("memory storage never fails");

    let store = GameStore::restore(storage, GameConfig::default());

    assert_eq!(store.state(), &jeopardy::GameState::new());
}

#[test]
fn snapshot_from_original_shape_is_accepted() {
    let data = serde_json::to_value(demo_game_data()).expect("bank should serialize");
    let current = data["categories"][0]["questions"][2].clone();
    let text = serde_json::json!({
        "state": {
            "score": 100,
            "currentQuestion": current,
            "gameData": data,
            "gameStarted": true,
            "gameCompleted": false,
            "answeredQuestions": ["0-0", "0-1"],
            "correctAnswers": ["0-0"],
            "incorrectAnswers": ["0-1"]
        },
        "version": 0
    })
    .to_string();

    let mut storage = MemoryStorage::new();
    storage.set_item(KEY, &text).expect("memory storage never fails");
    let mut store = GameStore::restore(storage, GameConfig::default());

    assert_eq!(
        store.current_question().map(|active| active.key),
        Some(QuestionKey::new(0, 2))
    );

    store.answer_question(true);
    assert_eq!(store.state().score, 400);
    assert_eq!(store.summary().categories_completed, 1);
}

#[test]
fn oversized_writes_are_dropped_without_losing_state() {
    let mut store = GameStore::new(MemoryStorage::with_quota(64), GameConfig::default());
    store.set_game_data(demo_game_data());
    store.select_question(0, 0);
    store.answer_question(true);

    assert_eq!(store.state().score, 100);
    assert!(store.storage().is_empty());
}

#[test]
fn stored_keys_off_the_board_are_discarded() {
    let store = restore_from(serde_json::json!({
        "gameData": demo_bank_json(),
        "answeredQuestions": keys(7, 10),
        "correctAnswers": keys(7, 10)
    }));

    assert!(store.state().answered_questions.is_empty());
    assert!(store.state().correct_answers.is_empty());
    assert!(!store.state().game_completed);

    let summary = store.summary();
    assert_eq!(summary.questions_answered, 0);
    assert_eq!(summary.accuracy, 0);
}

#[test]
fn off_board_answers_do_not_finish_the_game() {
    let store = restore_from(serde_json::json!({
        "gameData": demo_bank_json(),
        "incorrectAnswers": keys(9, 9)
    }));

    assert!(!store.state().game_completed);
    let open = store
        .board()
        .into_iter()
        .flatten()
        .filter(|(_, status)| matches!(status, CellStatus::Open { .. }))
        .count();
    assert_eq!(open, 9);
}

#[test]
fn restored_question_with_off_board_key_is_answered_at_its_bank_position() {
    let data = demo_bank_json();
    let current = data["categories"][0]["questions"][1].clone();
    let mut store = restore_from(serde_json::json!({
        "gameData": data,
        "currentQuestion": current,
        "currentQuestionKey": "7-3"
    }));

    assert_eq!(
        store.current_question().map(|active| active.key),
        Some(QuestionKey::new(0, 1))
    );

    store.answer_question(true);

    assert_eq!(store.state().score, 200);
    assert_eq!(
        store.state().answered_questions.iter().copied().collect::<Vec<_>>(),
        vec![QuestionKey::new(0, 1)]
    );
    assert_keys_on_board(&store);
}

#[test]
fn restored_question_missing_from_bank_cannot_be_answered() {
    let mut current = demo_bank_json()["categories"][0]["questions"][0].clone();
    current["value"] = Value::from(5000);
    let mut store = restore_from(serde_json::json!({
        "gameData": demo_bank_json(),
        "currentQuestion": current,
        "currentQuestionKey": "9-9"
    }));

    assert!(store.current_question().is_none());

    store.answer_question(true);

    assert_eq!(store.state().score, 0);
    assert!(store.state().answered_questions.is_empty());
}
