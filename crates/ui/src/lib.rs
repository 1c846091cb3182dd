pub mod app;
pub mod bridge;
pub mod context;
pub mod quiz;
pub mod views;
pub mod vm;

pub use app::App;
pub use bridge::{Screen, UiBridge};
pub use context::{AppContext, UiApp, build_app_context};
pub use quiz::{QuizHandle, QuizIntent};
