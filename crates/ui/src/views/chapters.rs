use dioxus::prelude::*;
use quiz_core::model::SessionMode;

use crate::quiz::{QuizHandle, QuizIntent};
use crate::vm::ChapterListVm;

#[component]
pub fn ChapterGrid(list: ChapterListVm) -> Element {
    let quiz = use_context::<QuizHandle>();
    let has_cards = !list.is_empty();
    let all = list.all_chapters;

    rsx! {
        section { class: "chapter-select",
            h2 { "Choose a chapter" }
            if !has_cards {
                p { class: "empty", "No chapters are available yet." }
            }
            div { class: "chapter-grid",
                for card in list.cards {
                    div {
                        key: "{card.id}",
                        class: "chapter-card",
                        onclick: {
                            let id = card.id.clone();
                            move |_| quiz.dispatch(QuizIntent::Start(SessionMode::Chapter(id.clone())))
                        },
                        if let Some(badge) = card.badge.as_ref() {
                            div { class: "chapter-badge", "{badge}" }
                        }
                        h3 { "{card.title}" }
                        p { class: "chapter-meta",
                            span { class: "instructor", "{card.instructor}" }
                            span { class: "date", "{card.date}" }
                        }
                        p { class: "chapter-desc", "{card.description}" }
                        span { class: "question-count", "{card.question_count_label}" }
                    }
                }
                if has_cards {
                    div {
                        class: "chapter-card all-chapters",
                        onclick: move |_| quiz.dispatch(QuizIntent::Start(SessionMode::AllChapters)),
                        div { class: "chapter-badge", "🎯" }
                        h3 { "{all.title}" }
                        p { class: "chapter-meta",
                            span { class: "instructor", "Mixed practice" }
                            span { class: "date", "{all.subtitle}" }
                        }
                        p { class: "chapter-desc", "{all.description}" }
                        span { class: "question-count", "{all.question_count_label}" }
                    }
                }
            }
        }
    }
}
