use quiz_core::model::{ChapterDescriptor, Question};
use quiz_core::scoring::ScoreReport;

use super::view::ReviewItem;

/// Everything the session controller writes to the presentation layer.
///
/// Calls happen synchronously on the controller's thread, in the order the
/// controller makes them. Implementations render; they never mutate quiz state.
pub trait PresentationBridge {
    /// Show the chapter picker. `all_chapters_sample` is the size of the
    /// "all chapters" draw, for the aggregate entry.
    fn render_chapters(&mut self, chapters: &[ChapterDescriptor], all_chapters_sample: usize);

    fn show_loading(&mut self);

    fn show_question(
        &mut self,
        question: &Question,
        index: usize,
        total: usize,
        prior_answer: Option<usize>,
    );

    fn update_progress(&mut self, index: usize, total: usize);

    fn update_timer(&mut self, remaining_secs: u32);

    /// Ask whether to submit with `unanswered` questions left open.
    fn confirm_force_submit(&mut self, unanswered: usize) -> bool;

    fn show_results(&mut self, report: &ScoreReport, review: &[ReviewItem]);

    /// Surface a recoverable failure as a single human-readable message.
    fn show_error(&mut self, message: &str);
}

/// A call observed by `RecordingBridge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    Chapters { count: usize, all_chapters_sample: usize },
    Loading,
    Question {
        prompt: String,
        index: usize,
        total: usize,
        prior_answer: Option<usize>,
    },
    Progress { index: usize, total: usize },
    Timer(u32),
    Confirm(usize),
    Results { correct: usize, total: usize },
    Error(String),
}

/// Bridge double that records every call; confirmations answer `confirm_reply`.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    events: Vec<BridgeEvent>,
    confirm_reply: bool,
    last_review: Vec<ReviewItem>,
}

impl RecordingBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn confirming(reply: bool) -> Self {
        Self {
            confirm_reply: reply,
            ..Self::default()
        }
    }

    pub fn set_confirm_reply(&mut self, reply: bool) {
        self.confirm_reply = reply;
    }

    #[must_use]
    pub fn events(&self) -> &[BridgeEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[must_use]
    pub fn confirm_requests(&self) -> usize {
        self.count(|e| matches!(e, BridgeEvent::Confirm(_)))
    }

    #[must_use]
    pub fn results_shown(&self) -> usize {
        self.count(|e| matches!(e, BridgeEvent::Results { .. }))
    }

    #[must_use]
    pub fn timer_updates(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BridgeEvent::Timer(secs) => Some(*secs),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BridgeEvent::Error(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last_question(&self) -> Option<&BridgeEvent> {
        self.events
            .iter()
            .rev()
            .find(|e| matches!(e, BridgeEvent::Question { .. }))
    }

    #[must_use]
    pub fn last_review(&self) -> &[ReviewItem] {
        &self.last_review
    }

    fn count(&self, pred: impl Fn(&BridgeEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl PresentationBridge for RecordingBridge {
    fn render_chapters(&mut self, chapters: &[ChapterDescriptor], all_chapters_sample: usize) {
        self.events.push(BridgeEvent::Chapters {
            count: chapters.len(),
            all_chapters_sample,
        });
    }

    fn show_loading(&mut self) {
        self.events.push(BridgeEvent::Loading);
    }

    fn show_question(
        &mut self,
        question: &Question,
        index: usize,
        total: usize,
        prior_answer: Option<usize>,
    ) {
        self.events.push(BridgeEvent::Question {
            prompt: question.prompt.clone(),
            index,
            total,
            prior_answer,
        });
    }

    fn update_progress(&mut self, index: usize, total: usize) {
        self.events.push(BridgeEvent::Progress { index, total });
    }

    fn update_timer(&mut self, remaining_secs: u32) {
        self.events.push(BridgeEvent::Timer(remaining_secs));
    }

    fn confirm_force_submit(&mut self, unanswered: usize) -> bool {
        self.events.push(BridgeEvent::Confirm(unanswered));
        self.confirm_reply
    }

    fn show_results(&mut self, report: &ScoreReport, review: &[ReviewItem]) {
        self.events.push(BridgeEvent::Results {
            correct: report.correct(),
            total: report.total(),
        });
        self.last_review = review.to_vec();
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(BridgeEvent::Error(message.to_owned()));
    }
}
