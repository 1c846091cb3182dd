use dioxus::prelude::*;

use crate::quiz::{QuizHandle, QuizIntent};

#[component]
pub fn ErrorBanner(message: String, can_retry: bool) -> Element {
    let quiz = use_context::<QuizHandle>();

    rsx! {
        div { class: "banner error", role: "alert",
            p { "{message}" }
            if can_retry {
                button {
                    id: "error-retry",
                    class: "btn secondary",
                    onclick: move |_| quiz.dispatch(QuizIntent::RetryCatalog),
                    "Retry"
                }
            }
            button {
                id: "error-dismiss",
                class: "btn link",
                onclick: move |_| quiz.dispatch(QuizIntent::DismissError),
                "Dismiss"
            }
        }
    }
}

/// Shown when a submit was held back by unanswered questions.
#[component]
pub fn ConfirmBanner(unanswered: usize) -> Element {
    let quiz = use_context::<QuizHandle>();
    let noun = if unanswered == 1 { "question" } else { "questions" };

    rsx! {
        div { class: "banner confirm", role: "alertdialog",
            p { "You still have {unanswered} unanswered {noun}. Submit anyway?" }
            button {
                id: "confirm-submit",
                class: "btn primary",
                onclick: move |_| quiz.dispatch(QuizIntent::ConfirmSubmit),
                "Submit anyway"
            }
            button {
                id: "confirm-cancel",
                class: "btn secondary",
                onclick: move |_| quiz.dispatch(QuizIntent::DismissConfirm),
                "Keep answering"
            }
        }
    }
}
