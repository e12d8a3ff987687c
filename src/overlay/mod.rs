//! Generic modal-presentation mechanism.
//!
//! Hosts record forms and summaries above the dashboard without knowing how
//! they render. Split into the single-fire [`channel`] and the stack-owning
//! [`manager`].

pub mod channel;
pub mod manager;

pub use channel::{outcome_channel, Outcome, OutcomeReceiver, OutcomeSender};
pub use manager::{MountPoint, OverlayConfig, OverlayHandle, OverlayManager};
