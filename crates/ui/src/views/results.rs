use dioxus::prelude::*;

use crate::quiz::{QuizHandle, QuizIntent};
use crate::vm::ResultsVm;

#[component]
pub fn ResultsPanel(results: ResultsVm) -> Element {
    let quiz = use_context::<QuizHandle>();

    rsx! {
        section { class: "results-container",
            div { class: "score-summary",
                div { class: "score-display", "{results.score_label}" }
                div { class: "score-percentage", "{results.percentage_label}" }
                div { class: "score-stats",
                    div { class: "stat correct",
                        span { class: "stat-value", "{results.correct}" }
                        span { class: "stat-label", "Correct" }
                    }
                    div { class: "stat incorrect",
                        span { class: "stat-value", "{results.incorrect}" }
                        span { class: "stat-label", "Incorrect" }
                    }
                    div { class: "stat unanswered",
                        span { class: "stat-value", "{results.unanswered}" }
                        span { class: "stat-label", "Unanswered" }
                    }
                    div { class: "stat total",
                        span { class: "stat-value", "{results.total}" }
                        span { class: "stat-label", "Total" }
                    }
                }
                button {
                    id: "results-back",
                    class: "btn primary",
                    onclick: move |_| quiz.dispatch(QuizIntent::BackToChapters),
                    "Back to chapters"
                }
            }

            div { class: "questions-results",
                for row in results.rows {
                    div { key: "{row.number}", class: "result-card",
                        div { class: "result-card-header {row.status.class()}",
                            span { class: "result-number", "Question {row.number}" }
                            span { class: "result-status", "{row.status.label()}" }
                        }
                        div { class: "result-question", dangerous_inner_html: "{row.prompt_html}" }
                        match row.your_answer_html.as_ref() {
                            Some(answer) => rsx! {
                                div { class: "result-answer {row.status.class()}",
                                    span { "Your answer: " }
                                    span { dangerous_inner_html: "{answer}" }
                                }
                            },
                            None => rsx! {
                                div { class: "result-answer unanswered", "Not answered" }
                            },
                        }
                        if let Some(correct) = row.correct_answer_html.as_ref() {
                            div { class: "result-answer correct",
                                span { "Correct answer: " }
                                span { dangerous_inner_html: "{correct}" }
                            }
                        }
                        if let Some(explanation) = row.explanation_html.as_ref() {
                            div { class: "result-explanation",
                                strong { "Explanation: " }
                                span { dangerous_inner_html: "{explanation}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
