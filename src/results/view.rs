//! Results view model: what the results screen shows, composed from two
//! independently resolved slots.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::advice::AdviceResult;
use crate::error::{AdviceError, EnvelopeError};
use crate::places::{LocationState, ProviderEntry};

/// Everything the results screen can show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsView {
    Loading,
    Error {
        message: String,
    },
    Ready {
        advice: AdviceResult,
        /// Empty when location was unavailable, the lookup failed, or it has
        /// not resolved yet.
        providers: Vec<ProviderEntry>,
        /// The lookup had not finished when this view was taken.
        providers_pending: bool,
    },
}

/// Update delivered by one of the two pipelines.
#[derive(Debug)]
pub enum SlotUpdate {
    Advice(Result<AdviceResult, AdviceError>),
    Location(LocationState),
}

/// State of one results view. Each pipeline owns one slot; they are
/// combined only in [`ResultsSession::view`].
#[derive(Debug, Clone)]
pub struct ResultsSession {
    pub request_id: Uuid,
    pub started_at: DateTime<Utc>,
    advice: Option<Result<AdviceResult, String>>,
    location: LocationState,
}

impl Default for ResultsSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsSession {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: Utc::now(),
            advice: None,
            location: LocationState::Unrequested,
        }
    }

    /// Session whose envelope could not be read; it never leaves the error
    /// state.
    pub fn rejected(error: &EnvelopeError) -> Self {
        let mut session = Self::new();
        session.advice = Some(Err(user_message(error)));
        session
    }

    pub fn apply(&mut self, update: SlotUpdate) {
        match update {
            SlotUpdate::Advice(result) => {
                self.advice = Some(result.map_err(|e| user_message(&e)));
            }
            SlotUpdate::Location(state) => self.location = state,
        }
    }

    pub fn location(&self) -> &LocationState {
        &self.location
    }

    /// Milliseconds since the session started.
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }

    /// Whether both slots have reached a final value.
    pub fn is_settled(&self) -> bool {
        match &self.advice {
            None => false,
            Some(Err(_)) => true,
            Some(Ok(_)) => self.location.is_terminal(),
        }
    }

    pub fn view(&self) -> ResultsView {
        match &self.advice {
            None => ResultsView::Loading,
            Some(Err(message)) => ResultsView::Error {
                message: message.clone(),
            },
            Some(Ok(advice)) => ResultsView::Ready {
                advice: advice.clone(),
                providers: self.location.providers().to_vec(),
                providers_pending: !self.location.is_terminal(),
            },
        }
    }
}

fn user_message(error: &dyn std::fmt::Display) -> String {
    format!("Something went wrong: {error}")
}
