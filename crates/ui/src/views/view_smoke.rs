use quiz_core::model::{ChapterId, SessionMode};
use services::SessionPhase;

use super::test_harness::{sample_source, setup_view_harness};
use crate::quiz::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn chapter_grid_lists_catalog_and_all_chapters_card() {
    let harness = setup_view_harness(sample_source()).await;
    let html = harness.render();
    for expected in ["Ownership", "Lifetimes", "Week 2", "All chapters", "50 questions"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn catalog_failure_offers_retry() {
    let source = sample_source();
    source.fail_catalog(true);
    let mut harness = setup_view_harness(source).await;
    let html = harness.render();
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains("chapters.json"), "missing locator in {html}");

    harness.source.fail_catalog(false);
    harness.send(QuizIntent::RetryCatalog).await;
    let html = harness.render();
    assert!(!html.contains("Retry"), "stale error in {html}");
    assert!(html.contains("Ownership"), "missing chapters in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn starting_a_chapter_shows_first_question_and_timer() {
    let mut harness = setup_view_harness(sample_source()).await;
    harness
        .send(QuizIntent::Start(SessionMode::Chapter(ChapterId::new("2"))))
        .await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing heading in {html}");
    assert!(html.contains("Time left: 20:00"), "missing timer in {html}");
    assert!(html.contains("lifetimes question"), "missing prompt in {html}");
    assert!(html.contains("<code>Box</code>"), "option markup lost in {html}");
    assert!(html.contains("Next"), "missing next in {html}");
    assert!(!html.contains("Submit"), "submit shown early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn submit_with_gaps_asks_then_shows_results() {
    let mut harness = setup_view_harness(sample_source()).await;
    harness
        .send(QuizIntent::Start(SessionMode::Chapter(ChapterId::new("1"))))
        .await;
    harness.send(QuizIntent::Answer(0)).await;
    harness.send(QuizIntent::Next).await;
    harness.send(QuizIntent::Next).await;

    let html = harness.render();
    assert!(html.contains("Submit"), "missing submit on last question in {html}");

    harness.send(QuizIntent::Submit).await;
    let html = harness.render();
    assert!(
        html.contains("You still have 2 unanswered questions"),
        "missing confirmation in {html}"
    );
    assert_eq!(harness.phase(), SessionPhase::Active);

    harness.send(QuizIntent::ConfirmSubmit).await;
    let html = harness.render();
    assert!(html.contains("1/3"), "missing score in {html}");
    assert!(html.contains("33%"), "missing percentage in {html}");
    assert!(html.contains("Not answered"), "missing unanswered marker in {html}");
    assert!(html.contains("heap allocation"), "missing explanation in {html}");
    assert_eq!(harness.phase(), SessionPhase::Submitted);
}
