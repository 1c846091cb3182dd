#![forbid(unsafe_code)]

pub mod fs;
pub mod http;
pub mod mapping;
pub mod repository;

pub use repository::{InMemorySource, QuestionSource, SourceError, SourceLocation};
