use dioxus::prelude::*;
use services::SessionPhase;

use crate::bridge::Screen;
use crate::context::AppContext;
use crate::quiz::QuizHandle;
use crate::views::{ChapterGrid, ConfirmBanner, ErrorBanner, QuestionPanel, ResultsPanel};

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Chapter Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizRoot {}
            }
        }
    }
}

/// Owns the session controller and switches panes on its screen.
#[component]
pub fn QuizRoot() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = use_signal(move || ctx.controller());
    let quiz = use_context_provider(|| QuizHandle::new(controller));

    use_hook(move || quiz.load_catalog());

    #[cfg(test)]
    {
        let dispatch = use_callback(move |intent: crate::quiz::QuizIntent| quiz.dispatch(intent));
        use_hook(move || {
            if let Some(handles) = try_consume_context::<crate::views::QuizTestHandles>() {
                handles.register(dispatch, controller);
            }
        });
    }

    let ctl = controller.read();
    let bridge = ctl.bridge();
    let screen = bridge.screen().clone();
    let error = bridge.error().map(str::to_owned);
    let pending_confirm = bridge.pending_confirm();
    let timer = bridge.timer().map(str::to_owned);
    let progress = bridge.progress();
    let catalog_missing = ctl.phase() == SessionPhase::Idle;
    drop(ctl);
    let show_starting = error.is_none();

    rsx! {
        div { class: "container",
            header { class: "app-header",
                h1 { "Chapter Quiz" }
            }
            if let Some(message) = error {
                ErrorBanner { message, can_retry: catalog_missing }
            }
            if let Some(unanswered) = pending_confirm {
                ConfirmBanner { unanswered }
            }
            main { class: "content",
                match screen {
                    Screen::Starting => rsx! {
                        if show_starting {
                            div { class: "loading", "Loading chapters…" }
                        }
                    },
                    Screen::Loading => rsx! {
                        div { class: "loading", "Loading questions…" }
                    },
                    Screen::Chapters(list) => rsx! { ChapterGrid { list } },
                    Screen::Question(question) => rsx! {
                        QuestionPanel { question, progress, timer }
                    },
                    Screen::Results(results) => rsx! { ResultsPanel { results } },
                }
            }
        }
    }
}
