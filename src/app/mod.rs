//! Application layer: state, events, and actions.
//!
//! The dashboard is a pure state machine: events go into
//! [`handle_event`](handler::handle_event), state mutates, and actions come
//! out for the host to execute. Nothing in here performs I/O.

pub mod actions;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use state::{DashboardState, OverlayView};
