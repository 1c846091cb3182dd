use dioxus::prelude::*;
use quiz_core::model::SessionMode;
use services::{LoadOutcome, SessionController, TickOutcome, Ticker, TimerToken};

use crate::bridge::UiBridge;

/// A user action on the quiz screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    RetryCatalog,
    Start(SessionMode),
    Answer(usize),
    Previous,
    Next,
    Submit,
    ConfirmSubmit,
    DismissConfirm,
    DismissError,
    BackToChapters,
}

/// Shared handle to the session controller, provided as context by `App`.
///
/// Every action is a short synchronous controller call; only bank fetches and
/// the countdown run as spawned tasks, and neither holds the controller across
/// an await.
#[derive(Clone, Copy, PartialEq)]
pub struct QuizHandle {
    controller: Signal<SessionController<UiBridge>>,
}

impl QuizHandle {
    #[must_use]
    pub fn new(controller: Signal<SessionController<UiBridge>>) -> Self {
        Self { controller }
    }

    pub fn dispatch(self, intent: QuizIntent) {
        match intent {
            QuizIntent::RetryCatalog => self.load_catalog(),
            QuizIntent::Start(mode) => self.start(mode),
            QuizIntent::Answer(option) => self.answer(option),
            QuizIntent::Previous => self.previous(),
            QuizIntent::Next => self.next(),
            QuizIntent::Submit => self.submit(),
            QuizIntent::ConfirmSubmit => self.confirm_submit(),
            QuizIntent::DismissConfirm => self.dismiss_confirm(),
            QuizIntent::DismissError => self.dismiss_error(),
            QuizIntent::BackToChapters => self.back_to_chapters(),
        }
    }

    /// Fetch the catalog and show the chapter picker.
    pub fn load_catalog(self) {
        let mut controller = self.controller;
        spawn(async move {
            let source = {
                let mut ctl = controller.write();
                ctl.bridge_mut().dismiss_error();
                ctl.source()
            };
            let result = source.load_catalog().await;
            if let Err(err) = controller.write().apply_catalog(result) {
                tracing::debug!(error = %err, "catalog load failed");
            }
        });
    }

    fn start(self, mode: SessionMode) {
        let mut controller = self.controller;
        let pending = match controller.write().start_loading(mode) {
            Ok(pending) => pending,
            Err(err) => {
                tracing::debug!(error = %err, "quiz did not start");
                return;
            }
        };
        tracing::debug!(mode = %pending.mode(), "loading questions");
        spawn(async move {
            let loaded = pending.run().await;
            let outcome = controller.write().complete_loading(loaded);
            match outcome {
                Ok(LoadOutcome::Started { timer, .. }) => run_countdown(controller, timer).await,
                Ok(LoadOutcome::Stale) => {}
                Err(err) => tracing::debug!(error = %err, "quiz did not start"),
            }
        });
    }

    fn answer(self, option: usize) {
        let mut controller = self.controller;
        if let Err(err) = controller.write().record_answer(option) {
            tracing::warn!(error = %err, "answer rejected");
        }
    }

    fn previous(self) {
        let mut controller = self.controller;
        if let Err(err) = controller.write().go_to_previous() {
            tracing::warn!(error = %err, "previous rejected");
        }
    }

    fn next(self) {
        let mut controller = self.controller;
        if let Err(err) = controller.write().go_to_next() {
            tracing::warn!(error = %err, "next rejected");
        }
    }

    fn submit(self) {
        let mut controller = self.controller;
        controller.write().submit(false);
    }

    /// Submit despite unanswered questions.
    fn confirm_submit(self) {
        let mut controller = self.controller;
        let mut ctl = controller.write();
        ctl.bridge_mut().arm_submit();
        ctl.submit(false);
    }

    fn dismiss_confirm(self) {
        let mut controller = self.controller;
        controller.write().bridge_mut().dismiss_confirm();
    }

    fn dismiss_error(self) {
        let mut controller = self.controller;
        controller.write().bridge_mut().dismiss_error();
    }

    fn back_to_chapters(self) {
        let mut controller = self.controller;
        controller.write().back_to_chapters();
    }
}

/// Feed one tick per second to the controller until the countdown for
/// `token` expires or is superseded.
async fn run_countdown(mut controller: Signal<SessionController<UiBridge>>, token: TimerToken) {
    let mut ticker = Ticker::every_second();
    ticker.sync(Some(token));
    loop {
        let token = ticker.tick().await;
        match controller.write().tick(token) {
            TickOutcome::Running { .. } => {}
            TickOutcome::Expired | TickOutcome::Ignored => break,
        }
    }
}
