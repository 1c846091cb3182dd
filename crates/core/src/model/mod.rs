mod chapter;
mod ids;
mod question;
mod settings;

pub use chapter::{ChapterDescriptor, SessionMode};
pub use ids::{ChapterId, ParseIdError, SessionId};
pub use question::{AnswerOption, Question};
pub use settings::{QuizSettings, SettingsError};
