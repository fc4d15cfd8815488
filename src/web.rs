use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use leptos::*;
use wasm_bindgen::prelude::*;

use crate::{
    AutoClose, CellStatus, GameConfig, GameData, GameStore, Question, QuestionKey, SessionStorage,
    StorageError, demo_game_data, parse_bank,
};

const BANK_URL: &str = "questions.json";

/// `window.sessionStorage`, or nothing when the page has no such storage.
struct BrowserSessionStorage {
    inner: Option<web_sys::Storage>,
}

impl BrowserSessionStorage {
    fn open() -> Self {
        let inner = web_sys::window().and_then(|window| window.session_storage().ok().flatten());
        if inner.is_none() {
            ::log::warn!("session storage unavailable; progress will not survive a reload");
        }
        Self { inner }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner.as_ref().ok_or(StorageError::Unavailable)
    }
}

fn backend_error(value: JsValue) -> StorageError {
    StorageError::Backend(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

impl SessionStorage for BrowserSessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(backend_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(backend_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(backend_error)
    }
}

type BrowserStore = GameStore<BrowserSessionStorage>;

struct ConsoleLogger;

impl ::log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &::log::Metadata) -> bool {
        metadata.level() <= ::log::Level::Info
    }

    fn log(&self, record: &::log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            ::log::Level::Error => web_sys::console::error_1(&message),
            ::log::Level::Warn => web_sys::console::warn_1(&message),
            _ => web_sys::console::log_1(&message),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn init_logging() {
    if ::log::set_logger(&LOGGER).is_ok() {
        ::log::set_max_level(::log::LevelFilter::Info);
    }
}

async fn fetch_bank() -> Result<GameData, String> {
    let response = Request::get(BANK_URL)
        .send()
        .await
        .map_err(|error| error.to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {} while fetching {BANK_URL}", response.status()));
    }

    let text = response.text().await.map_err(|error| error.to_string())?;
    parse_bank(&text).map_err(|error| error.to_string())
}

#[component]
fn Board(store: RwSignal<BrowserStore>, on_open: Callback<QuestionKey>) -> impl IntoView {
    let category_names = move || {
        store.with(|store| {
            store
                .state()
                .game_data
                .as_ref()
                .map(|data| {
                    data.categories
                        .iter()
                        .map(|category| category.name.clone())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        <section class="board">
            <p class="board-score">{move || format!("${}", store.with(|store| store.state().score))}</p>
            <div class="board-grid">
                {move || {
                    category_names()
                        .into_iter()
                        .map(|name| view! { <div class="category-header">{name}</div> })
                        .collect_view()
                }}
                {move || {
                    store
                        .with(|store| store.board())
                        .into_iter()
                        .flatten()
                        .map(|(key, status)| {
                            let (label, class, answered) = match status {
                                CellStatus::Open { value } => (format!("${value}"), "cell open", false),
                                CellStatus::Correct => ("✓".to_string(), "cell correct", true),
                                CellStatus::Incorrect => ("✗".to_string(), "cell incorrect", true),
                            };

                            view! {
                                <button class=class disabled=answered on:click=move |_| on_open.call(key)>
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}

#[component]
fn QuestionDialog(
    store: RwSignal<BrowserStore>,
    picked: ReadSignal<Option<usize>>,
    on_choose: Callback<usize>,
    on_close: Callback<()>,
) -> impl IntoView {
    move || {
        store
            .with(|store| store.current_question().cloned())
            .map(|active| {
                let question = active.question;
                let correct = question.correct_answer;

                view! {
                    <div class="question-overlay" role="dialog" aria-modal="true">
                        <section class="question-card">
                            <header class="question-value">{format!("${}", question.value)}</header>
                            <p class="question-prompt">{question.prompt.clone()}</p>
                            <div class="question-options">
                                {question
                                    .options
                                    .iter()
                                    .enumerate()
                                    .map(|(index, option)| {
                                        let class = move || match picked.get() {
                                            None => "option",
                                            Some(_) if index == correct => "option correct",
                                            Some(choice) if choice == index => "option wrong",
                                            Some(_) => "option muted",
                                        };

                                        view! {
                                            <button
                                                class=class
                                                disabled=move || picked.get().is_some()
                                                on:click=move |_| on_choose.call(index)
                                            >
                                                <span class="option-letter">
                                                    {format!("{}.", Question::option_label(index))}
                                                </span>
                                                <span class="option-body">{option.clone()}</span>
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <button class="pill" on:click=move |_| on_close.call(())>"Close"</button>
                        </section>
                    </div>
                }
            })
    }
}

#[component]
fn Summary(store: RwSignal<BrowserStore>, on_reset: Callback<()>) -> impl IntoView {
    let summary = move || store.with(|store| store.summary());

    view! {
        <section class="summary">
            <h2 class="summary-title">"Final Score"</h2>
            <p class="final-score">{move || format!("${}", summary().score)}</p>
            <p class="lede">
                {move || format!("{}% of maximum possible score", summary().score_percentage)}
            </p>
            <dl class="summary-stats">
                <dt>"Questions Answered"</dt>
                <dd>
                    {move || {
                        let summary = summary();
                        format!("{} / {}", summary.questions_answered, summary.total_questions)
                    }}
                </dd>
                <dt>"Categories Completed"</dt>
                <dd>
                    {move || {
                        let summary = summary();
                        format!("{} / {}", summary.categories_completed, summary.total_categories)
                    }}
                </dd>
                <dt>"Accuracy"</dt>
                <dd>{move || format!("{}%", summary().accuracy)}</dd>
            </dl>
            <button class="primary" on:click=move |_| on_reset.call(())>"Play Again"</button>
        </section>
    }
}

#[component]
fn App() -> impl IntoView {
    let config = GameConfig::default();
    let delay = config.auto_close_delay();
    let store = create_rw_signal(GameStore::restore(BrowserSessionStorage::open(), config));
    let (picked, set_picked) = create_signal::<Option<usize>>(None);

    let timer = Rc::new(RefCell::new(AutoClose::new()));
    let pending = Rc::new(RefCell::new(None::<TimeoutHandle>));

    let cancel_pending = {
        let timer = timer.clone();
        let pending = pending.clone();

        Rc::new(move || {
            timer.borrow_mut().cancel();
            if let Some(handle) = pending.borrow_mut().take() {
                handle.clear();
            }
        })
    };

    wasm_bindgen_futures::spawn_local(async move {
        let data = match fetch_bank().await {
            Ok(data) => data,
            Err(message) => {
                ::log::warn!("using built-in questions: {message}");
                demo_game_data()
            }
        };
        store.update(|store| store.set_game_data(data));
    });

    let open_question = {
        let cancel_pending = cancel_pending.clone();

        Callback::new(move |key: QuestionKey| {
            cancel_pending();
            set_picked.set(None);
            store.update(|store| store.select_question(key.category, key.question));
        })
    };

    let close_question = {
        let cancel_pending = cancel_pending.clone();

        Callback::new(move |_: ()| {
            cancel_pending();
            set_picked.set(None);
            store.update(|store| store.close_question());
        })
    };

    let choose_option = Callback::new(move |index: usize| {
        if picked.get_untracked().is_some() {
            return;
        }

        set_picked.set(Some(index));
        store.update(|store| {
            store.submit_option(index);
        });

        let ticket = timer.borrow_mut().arm();
        let timer = timer.clone();
        let scheduled = set_timeout_with_handle(
            move || {
                if timer.borrow_mut().fire(ticket) {
                    set_picked.set(None);
                    store.update(|store| store.close_question());
                }
            },
            delay,
        );

        match scheduled {
            Ok(handle) => *pending.borrow_mut() = Some(handle),
            Err(error) => ::log::warn!("could not schedule auto-close: {error:?}"),
        }
    });

    let reset_game = Callback::new(move |_: ()| {
        cancel_pending();
        set_picked.set(None);
        store.update(|store| store.reset_game());
    });

    let loaded = move || store.with(|store| store.state().game_data.is_some());
    let completed = move || store.with(|store| store.state().game_completed);

    view! {
        <main class="page">
            <header class="page-header">
                <div>
                    <h1 class="headline">"Composable Commerce Jeopardy"</h1>
                </div>
                <button class="pill" title="Start Over" on:click=move |_| reset_game.call(())>
                    "↻"
                </button>
            </header>

            {move || {
                if !loaded() {
                    view! { <p class="lede">"Loading game..."</p> }.into_view()
                } else if completed() {
                    view! { <Summary store=store on_reset=reset_game /> }.into_view()
                } else {
                    view! { <Board store=store on_open=open_question /> }.into_view()
                }
            }}

            <QuestionDialog
                store=store
                picked=picked
                on_choose=choose_option
                on_close=close_question
            />
        </main>
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging();
    mount_to_body(|| view! { <App /> });
}
