mod bridge;
mod controller;
mod state;
mod timer;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use bridge::{BridgeEvent, PresentationBridge, RecordingBridge};
pub use controller::{
    LoadOutcome, LoadedBank, PendingLoad, SessionController, SessionPhase, SubmitOutcome,
};
pub use state::SessionState;
pub use timer::{TickOutcome, Ticker, Timer, TimerToken};
pub use view::{ReviewItem, build_review, format_remaining, option_label};
