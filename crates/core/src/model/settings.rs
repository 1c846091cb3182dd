use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("quiz duration must be > 0 seconds")]
    InvalidDuration,

    #[error("all-chapters sample size must be > 0")]
    InvalidSampleSize,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Policy knobs for a quiz session.
///
/// Defaults match the classroom setup: a 20 minute countdown, 50 questions
/// drawn in "all chapters" mode, options shown in their loaded order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    duration_secs: u32,
    all_chapters_sample: usize,
    shuffle_options: bool,
}

impl QuizSettings {
    pub const DEFAULT_DURATION_SECS: u32 = 20 * 60;
    pub const DEFAULT_ALL_CHAPTERS_SAMPLE: usize = 50;

    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns error if the duration or sample size is zero.
    pub fn new(
        duration_secs: u32,
        all_chapters_sample: usize,
        shuffle_options: bool,
    ) -> Result<Self, SettingsError> {
        if duration_secs == 0 {
            return Err(SettingsError::InvalidDuration);
        }
        if all_chapters_sample == 0 {
            return Err(SettingsError::InvalidSampleSize);
        }

        Ok(Self {
            duration_secs,
            all_chapters_sample,
            shuffle_options,
        })
    }

    // Accessors
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// How many questions "all chapters" mode draws from the combined pool.
    #[must_use]
    pub fn all_chapters_sample(&self) -> usize {
        self.all_chapters_sample
    }

    /// When true, each question's options are shuffled once at session start.
    #[must_use]
    pub fn shuffle_options(&self) -> bool {
        self.shuffle_options
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            duration_secs: Self::DEFAULT_DURATION_SECS,
            all_chapters_sample: Self::DEFAULT_ALL_CHAPTERS_SAMPLE,
            shuffle_options: false,
        }
    }
}
