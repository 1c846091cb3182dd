#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::SessionError;

pub use sessions::{
    BridgeEvent, LoadOutcome, LoadedBank, PendingLoad, PresentationBridge, RecordingBridge,
    ReviewItem, SessionController, SessionPhase, SessionState, SubmitOutcome, TickOutcome, Ticker,
    Timer, TimerToken,
};
