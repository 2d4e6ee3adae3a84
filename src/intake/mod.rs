//! Symptom intake: five questions asked one at a time.
//!
//! The intake collects an `IntakeForm` through a linear state machine and
//! hands it to the results view inside a percent-encoded envelope.

pub mod envelope;
pub mod model;
pub mod state;

pub use model::{IntakeField, IntakeForm};
pub use state::{IntakeState, Transition};
