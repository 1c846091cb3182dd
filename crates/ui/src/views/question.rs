use dioxus::prelude::*;

use crate::quiz::{QuizHandle, QuizIntent};
use crate::vm::{ProgressVm, QuestionVm};

#[component]
pub fn QuestionPanel(question: QuestionVm, progress: ProgressVm, timer: Option<String>) -> Element {
    let quiz = use_context::<QuizHandle>();
    let width = format!("width: {}%", progress.percent());
    let progress_label = progress.label();

    rsx! {
        section { class: "quiz-container",
            header { class: "quiz-header",
                button {
                    id: "quiz-back",
                    class: "btn secondary",
                    onclick: move |_| quiz.dispatch(QuizIntent::BackToChapters),
                    "← Chapters"
                }
                span { class: "progress-label", "{progress_label}" }
                if let Some(timer) = timer.as_ref() {
                    span { id: "timer", class: "timer", "⏱ {timer}" }
                }
            }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "{width}" }
            }

            h3 { class: "question-number", "{question.heading}" }
            div { class: "question-text", dangerous_inner_html: "{question.prompt_html}" }

            div { class: "options",
                for option in question.options {
                    div {
                        key: "{option.index}",
                        class: if option.selected { "option selected" } else { "option" },
                        onclick: move |_| quiz.dispatch(QuizIntent::Answer(option.index)),
                        div { class: "option-label", "{option.label}" }
                        div { class: "option-text", dangerous_inner_html: "{option.text_html}" }
                    }
                }
            }

            nav { class: "quiz-nav",
                button {
                    id: "quiz-prev",
                    class: "btn secondary",
                    disabled: !question.can_go_previous,
                    onclick: move |_| quiz.dispatch(QuizIntent::Previous),
                    "Previous"
                }
                if question.is_last {
                    button {
                        id: "quiz-submit",
                        class: "btn primary",
                        onclick: move |_| quiz.dispatch(QuizIntent::Submit),
                        "Submit"
                    }
                } else {
                    button {
                        id: "quiz-next",
                        class: "btn primary",
                        onclick: move |_| quiz.dispatch(QuizIntent::Next),
                        "Next"
                    }
                }
            }
        }
    }
}
