use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::{ChapterDescriptor, Question, QuizSettings, SessionId, SessionMode};
use quiz_core::scoring::{ScoreReport, score};
use quiz_core::select::Selector;
use storage::{QuestionSource, SourceError};

use super::bridge::PresentationBridge;
use super::state::SessionState;
use super::timer::{TickOutcome, Timer, TimerToken};
use super::view::{ReviewItem, build_review};
use crate::error::SessionError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where the controller is in the quiz lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Catalog not loaded yet.
    Idle,
    Selecting,
    Loading,
    Active,
    Submitted,
}

/// Identifies one load request so a late completion can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoadTicket(u64);

struct SubmittedSession {
    state: SessionState,
    report: ScoreReport,
    review: Vec<ReviewItem>,
    submitted_at: DateTime<Utc>,
    forced: bool,
}

enum Phase {
    Idle,
    Selecting,
    Loading { ticket: LoadTicket },
    Active(SessionState),
    Submitted(Box<SubmittedSession>),
}

impl Phase {
    fn kind(&self) -> SessionPhase {
        match self {
            Phase::Idle => SessionPhase::Idle,
            Phase::Selecting => SessionPhase::Selecting,
            Phase::Loading { .. } => SessionPhase::Loading,
            Phase::Active(_) => SessionPhase::Active,
            Phase::Submitted(_) => SessionPhase::Submitted,
        }
    }
}

//
// ─── LOADING ───────────────────────────────────────────────────────────────────
//

/// A bank fetch issued by `start_loading`, detached from the controller so
/// the caller can await it without holding the controller.
pub struct PendingLoad {
    ticket: LoadTicket,
    mode: SessionMode,
    chapters: Vec<ChapterDescriptor>,
    source: Arc<dyn QuestionSource>,
}

impl PendingLoad {
    #[must_use]
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Fetch the question pool for this request.
    pub async fn run(self) -> LoadedBank {
        let result = match &self.mode {
            SessionMode::AllChapters => self.source.load_all_banks(&self.chapters).await,
            SessionMode::Chapter(_) => match self.chapters.first() {
                Some(chapter) => self.source.load_bank(&chapter.source_file).await,
                None => Ok(Vec::new()),
            },
        };
        LoadedBank {
            ticket: self.ticket,
            mode: self.mode,
            result,
        }
    }
}

impl fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingLoad")
            .field("ticket", &self.ticket)
            .field("mode", &self.mode)
            .field("chapters_len", &self.chapters.len())
            .finish_non_exhaustive()
    }
}

/// Completed fetch, handed back to `complete_loading`.
#[derive(Debug)]
pub struct LoadedBank {
    ticket: LoadTicket,
    mode: SessionMode,
    result: Result<Vec<Question>, SourceError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Started {
        session_id: SessionId,
        timer: TimerToken,
    },
    /// The controller had moved on; the load was discarded.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { forced: bool },
    /// The user declined to submit with unanswered questions.
    Declined,
    /// No active quiz; nothing happened.
    Ignored,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one quiz at a time through `Idle → Selecting → Loading → Active →
/// Submitted`, writing every visible change to its `PresentationBridge`.
///
/// All methods run to completion on the caller's thread. The only suspension
/// point is the bank fetch, which is split out as `PendingLoad` so nothing
/// borrows the controller while it is in flight.
pub struct SessionController<B: PresentationBridge> {
    source: Arc<dyn QuestionSource>,
    bridge: B,
    settings: QuizSettings,
    clock: Clock,
    selector: Selector,
    chapters: Vec<ChapterDescriptor>,
    phase: Phase,
    timer: Timer,
    next_ticket: u64,
}

impl<B: PresentationBridge> SessionController<B> {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, bridge: B) -> Self {
        Self {
            source,
            bridge,
            settings: QuizSettings::default(),
            clock: Clock::default(),
            selector: Selector::default(),
            chapters: Vec::new(),
            phase: Phase::Idle,
            timer: Timer::new(),
            next_ticket: 0,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase.kind()
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn chapters(&self) -> &[ChapterDescriptor] {
        &self.chapters
    }

    #[must_use]
    pub fn source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.source)
    }

    #[must_use]
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    /// The in-progress quiz, if any.
    #[must_use]
    pub fn active(&self) -> Option<&SessionState> {
        match &self.phase {
            Phase::Active(state) => Some(state),
            _ => None,
        }
    }

    /// Score of the last submitted quiz, while its results are on screen.
    #[must_use]
    pub fn report(&self) -> Option<&ScoreReport> {
        match &self.phase {
            Phase::Submitted(done) => Some(&done.report),
            _ => None,
        }
    }

    #[must_use]
    pub fn review(&self) -> Option<&[ReviewItem]> {
        match &self.phase {
            Phase::Submitted(done) => Some(&done.review),
            _ => None,
        }
    }

    /// Whether the last submission came from timer expiry.
    #[must_use]
    pub fn was_forced(&self) -> Option<bool> {
        match &self.phase {
            Phase::Submitted(done) => Some(done.forced),
            _ => None,
        }
    }

    /// Seconds between start and submission of the quiz on the results screen.
    #[must_use]
    pub fn elapsed_secs(&self) -> Option<i64> {
        match &self.phase {
            Phase::Submitted(done) => {
                Some((done.submitted_at - done.state.started_at()).num_seconds())
            }
            Phase::Active(state) => Some(self.clock.elapsed_since(state.started_at()).num_seconds()),
            _ => None,
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.timer.remaining_secs()
    }

    /// Token of the running countdown; feed ticks for it to `tick`.
    #[must_use]
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.timer.token()
    }

    // ─── Catalog ────────────────────────────────────────────────────────────

    /// Load the catalog and show the chapter picker.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Source` if the catalog is unavailable; the
    /// message is also surfaced through the bridge.
    pub async fn open(&mut self) -> Result<(), SessionError> {
        let source = self.source();
        let result = source.load_catalog().await;
        self.apply_catalog(result)
    }

    /// Install a catalog fetched by the caller (see `source`).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Source` when `result` is a failure.
    pub fn apply_catalog(
        &mut self,
        result: Result<Vec<ChapterDescriptor>, SourceError>,
    ) -> Result<(), SessionError> {
        match result {
            Ok(chapters) => {
                tracing::info!(chapters = chapters.len(), "catalog loaded");
                self.chapters = chapters;
                self.leave_session();
                self.phase = Phase::Selecting;
                self.render_chapters();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog unavailable");
                self.bridge.show_error(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Drop whatever is on screen and return to the chapter picker.
    pub fn back_to_chapters(&mut self) {
        self.leave_session();
        self.phase = if self.chapters.is_empty() {
            Phase::Idle
        } else {
            Phase::Selecting
        };
        self.render_chapters();
    }

    // ─── Starting a session ─────────────────────────────────────────────────

    /// Load, select and start a quiz in one call.
    ///
    /// # Errors
    ///
    /// Returns a recoverable `SessionError` if the catalog or bank cannot be
    /// loaded or yields no questions; the controller is back in `Selecting`.
    pub async fn begin(&mut self, mode: SessionMode) -> Result<LoadOutcome, SessionError> {
        if matches!(self.phase, Phase::Idle) {
            self.open().await?;
        }
        let pending = self.start_loading(mode)?;
        let loaded = pending.run().await;
        self.complete_loading(loaded)
    }

    /// Enter `Loading` for `mode` and hand back the fetch to run.
    ///
    /// Any running quiz is abandoned and its timer cancelled. A load already
    /// in flight becomes stale.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::CatalogNotLoaded` before `open`, or
    /// `SessionError::UnknownChapter` (surfaced, back to `Selecting`).
    pub fn start_loading(&mut self, mode: SessionMode) -> Result<PendingLoad, SessionError> {
        if matches!(self.phase, Phase::Idle) {
            return Err(SessionError::CatalogNotLoaded);
        }

        let chapters = match &mode {
            SessionMode::AllChapters => self.chapters.clone(),
            SessionMode::Chapter(id) => {
                let Some(chapter) = self.chapters.iter().find(|c| &c.id == id) else {
                    let err = SessionError::UnknownChapter(id.clone());
                    self.fail_to_selection(&err);
                    return Err(err);
                };
                vec![chapter.clone()]
            }
        };

        self.leave_session();
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        tracing::debug!(%mode, ticket = ticket.0, "loading questions");
        self.phase = Phase::Loading { ticket };
        self.bridge.show_loading();

        Ok(PendingLoad {
            ticket,
            mode,
            chapters,
            source: self.source(),
        })
    }

    /// Finish a load started by `start_loading`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Source` or `SessionError::Empty` (surfaced,
    /// back to `Selecting`).
    pub fn complete_loading(&mut self, loaded: LoadedBank) -> Result<LoadOutcome, SessionError> {
        let current = match &self.phase {
            Phase::Loading { ticket } => Some(*ticket),
            _ => None,
        };
        if current != Some(loaded.ticket) {
            tracing::debug!(ticket = loaded.ticket.0, "discarding stale load");
            return Ok(LoadOutcome::Stale);
        }

        let pool = match loaded.result {
            Ok(pool) => pool,
            Err(err) => {
                tracing::warn!(mode = %loaded.mode, error = %err, "question load failed");
                let err = SessionError::from(err);
                self.fail_to_selection(&err);
                return Err(err);
            }
        };

        let questions = self.select_questions(&loaded.mode, &pool);
        let state = match SessionState::new(
            SessionId::new_v4(),
            loaded.mode,
            questions,
            self.clock.now(),
        ) {
            Ok(state) => state,
            Err(err) => {
                self.fail_to_selection(&err);
                return Err(err);
            }
        };

        let session_id = state.id();
        tracing::info!(
            session = %session_id,
            mode = %state.mode(),
            questions = state.total(),
            pool = pool.len(),
            "quiz started"
        );
        self.phase = Phase::Active(state);
        let duration = self.settings.duration_secs();
        let timer = self.timer.start(duration);
        self.bridge.update_timer(duration);
        self.render_current();

        Ok(LoadOutcome::Started { session_id, timer })
    }

    fn select_questions(&mut self, mode: &SessionMode, pool: &[Question]) -> Vec<Question> {
        let drawn = match mode {
            SessionMode::AllChapters => self
                .selector
                .sample(pool, self.settings.all_chapters_sample()),
            SessionMode::Chapter(_) => pool.to_vec(),
        };
        let ordered = self.selector.shuffle(&drawn);
        if self.settings.shuffle_options() {
            ordered
                .iter()
                .map(|q| self.selector.shuffle_options(q))
                .collect()
        } else {
            ordered
        }
    }

    // ─── Answering and navigation ───────────────────────────────────────────

    /// Record `option` as the answer to the current question, replacing any
    /// earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside a quiz, or
    /// `SessionError::OptionOutOfRange` for a bad index.
    pub fn record_answer(&mut self, option: usize) -> Result<(), SessionError> {
        let state = self.active_mut("record an answer")?;
        state.record_answer(option)?;
        self.render_current();
        Ok(())
    }

    /// Go back one question; no-op at the first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside a quiz.
    pub fn go_to_previous(&mut self) -> Result<(), SessionError> {
        if self.active_mut("go to the previous question")?.go_previous() {
            self.render_current();
        }
        Ok(())
    }

    /// Go forward one question; no-op at the last.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside a quiz.
    pub fn go_to_next(&mut self) -> Result<(), SessionError> {
        if self.active_mut("go to the next question")?.go_next() {
            self.render_current();
        }
        Ok(())
    }

    // ─── Submission and time ────────────────────────────────────────────────

    /// Score the quiz and show results.
    ///
    /// Unless `forced`, unanswered questions require confirmation through the
    /// bridge; a refusal leaves the quiz running untouched. Outside `Active`
    /// this is a no-op, so a late timer expiry cannot submit twice.
    pub fn submit(&mut self, forced: bool) -> SubmitOutcome {
        let unanswered = match &self.phase {
            Phase::Active(state) => state.unanswered_count(),
            _ => return SubmitOutcome::Ignored,
        };
        if !forced && unanswered > 0 && !self.bridge.confirm_force_submit(unanswered) {
            tracing::debug!(unanswered, "submission declined");
            return SubmitOutcome::Declined;
        }

        self.timer.cancel();
        let Phase::Active(state) = std::mem::replace(&mut self.phase, Phase::Selecting) else {
            return SubmitOutcome::Ignored;
        };

        let report = score(state.questions(), state.answers());
        let review = build_review(state.questions(), &report);
        tracing::info!(
            session = %state.id(),
            correct = report.correct(),
            total = report.total(),
            unanswered,
            forced,
            "quiz submitted"
        );
        self.bridge.show_results(&report, &review);
        self.phase = Phase::Submitted(Box::new(SubmittedSession {
            state,
            report,
            review,
            submitted_at: self.clock.now(),
            forced,
        }));
        SubmitOutcome::Submitted { forced }
    }

    /// Advance the countdown by one second for `token`.
    ///
    /// Reaching zero forces submission. Ticks for an older countdown, or
    /// arriving after the quiz ended, are ignored.
    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if !matches!(self.phase, Phase::Active(_)) {
            return TickOutcome::Ignored;
        }
        let outcome = self.timer.tick(token);
        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Running { remaining_secs } => self.bridge.update_timer(remaining_secs),
            TickOutcome::Expired => {
                self.bridge.update_timer(0);
                tracing::info!("time is up");
                self.submit(true);
            }
        }
        outcome
    }

    // ─── Internals ──────────────────────────────────────────────────────────

    fn active_mut(&mut self, action: &'static str) -> Result<&mut SessionState, SessionError> {
        match &mut self.phase {
            Phase::Active(state) => Ok(state),
            _ => Err(SessionError::NotActive { action }),
        }
    }

    fn render_current(&mut self) {
        let Phase::Active(state) = &self.phase else {
            return;
        };
        let index = state.current_index();
        let total = state.total();
        self.bridge
            .show_question(state.current_question(), index, total, state.current_answer());
        self.bridge.update_progress(index, total);
    }

    fn render_chapters(&mut self) {
        self.bridge
            .render_chapters(&self.chapters, self.settings.all_chapters_sample());
    }

    /// Cancel the countdown and forget the current quiz or pending load.
    fn leave_session(&mut self) {
        self.timer.cancel();
        if let Phase::Active(state) = &self.phase {
            tracing::info!(session = %state.id(), "quiz abandoned");
        }
    }

    fn fail_to_selection(&mut self, err: &SessionError) {
        self.leave_session();
        self.phase = Phase::Selecting;
        self.bridge.show_error(&err.to_string());
        self.render_chapters();
    }
}

impl<B: PresentationBridge> fmt::Debug for SessionController<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.phase.kind())
            .field("settings", &self.settings)
            .field("chapters_len", &self.chapters.len())
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
