mod chapters;
mod notices;
mod question;
mod results;

#[cfg(test)]
pub(crate) mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chapters::ChapterGrid;
pub use notices::{ConfirmBanner, ErrorBanner};
pub use question::QuestionPanel;
pub use results::ResultsPanel;

#[cfg(test)]
pub(crate) use test_harness::QuizTestHandles;
