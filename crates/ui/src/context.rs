use std::sync::Arc;

use quiz_core::model::QuizSettings;
use quiz_core::select::Selector;
use services::SessionController;
use storage::QuestionSource;

use crate::bridge::UiBridge;

pub trait UiApp: Send + Sync {
    fn question_source(&self) -> Arc<dyn QuestionSource>;
    fn settings(&self) -> QuizSettings;

    /// Fixed shuffle seed, for reproducible runs.
    fn seed(&self) -> Option<u64> {
        None
    }
}

#[derive(Clone)]
pub struct AppContext {
    source: Arc<dyn QuestionSource>,
    settings: QuizSettings,
    seed: Option<u64>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            source: app.question_source(),
            settings: app.settings(),
            seed: app.seed(),
        }
    }

    #[must_use]
    pub fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.source)
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// A fresh controller wired to this context's source and settings.
    #[must_use]
    pub fn controller(&self) -> SessionController<UiBridge> {
        let selector = self.seed.map_or_else(Selector::from_os, Selector::from_seed);
        SessionController::new(self.question_source(), UiBridge::new())
            .with_settings(self.settings)
            .with_selector(selector)
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(&app)
}
