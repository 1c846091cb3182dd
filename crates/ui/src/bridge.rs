use quiz_core::model::{ChapterDescriptor, Question};
use quiz_core::scoring::ScoreReport;
use services::{PresentationBridge, ReviewItem};

use crate::vm::{
    ChapterListVm, ProgressVm, QuestionVm, ResultsVm, map_chapter_list, map_question,
    map_results, timer_label,
};

/// What the main pane shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    /// Catalog not loaded yet.
    #[default]
    Starting,
    Chapters(ChapterListVm),
    Loading,
    Question(QuestionVm),
    Results(ResultsVm),
}

/// Presentation state written by the session controller.
///
/// A desktop window cannot block on a yes/no dialog from inside a controller
/// call, so confirmation is two-step: an unarmed `confirm_force_submit` records
/// the unanswered count and declines; the confirm banner then arms the bridge
/// and submits again.
#[derive(Clone, Debug, Default)]
pub struct UiBridge {
    screen: Screen,
    timer: Option<String>,
    progress: ProgressVm,
    error: Option<String>,
    pending_confirm: Option<usize>,
    submit_armed: bool,
}

impl UiBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn timer(&self) -> Option<&str> {
        self.timer.as_deref()
    }

    #[must_use]
    pub fn progress(&self) -> ProgressVm {
        self.progress
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Unanswered count awaiting the user's decision.
    #[must_use]
    pub fn pending_confirm(&self) -> Option<usize> {
        self.pending_confirm
    }

    /// Accept the pending confirmation for the next submit.
    pub fn arm_submit(&mut self) {
        self.submit_armed = true;
    }

    pub fn dismiss_confirm(&mut self) {
        self.pending_confirm = None;
        self.submit_armed = false;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

impl PresentationBridge for UiBridge {
    fn render_chapters(&mut self, chapters: &[ChapterDescriptor], all_chapters_sample: usize) {
        self.screen = Screen::Chapters(map_chapter_list(chapters, all_chapters_sample));
        self.timer = None;
        self.dismiss_confirm();
    }

    fn show_loading(&mut self) {
        self.screen = Screen::Loading;
        self.error = None;
        self.timer = None;
        self.dismiss_confirm();
    }

    fn show_question(
        &mut self,
        question: &Question,
        index: usize,
        total: usize,
        prior_answer: Option<usize>,
    ) {
        self.screen = Screen::Question(map_question(question, index, total, prior_answer));
        self.dismiss_confirm();
    }

    fn update_progress(&mut self, index: usize, total: usize) {
        self.progress = ProgressVm { index, total };
    }

    fn update_timer(&mut self, remaining_secs: u32) {
        self.timer = Some(timer_label(remaining_secs));
    }

    fn confirm_force_submit(&mut self, unanswered: usize) -> bool {
        if std::mem::take(&mut self.submit_armed) {
            self.pending_confirm = None;
            return true;
        }
        self.pending_confirm = Some(unanswered);
        false
    }

    fn show_results(&mut self, report: &ScoreReport, review: &[ReviewItem]) {
        self.screen = Screen::Results(map_results(report, review));
        self.timer = None;
        self.dismiss_confirm();
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_owned());
    }
}
