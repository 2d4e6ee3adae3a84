//! Intake questionnaire data model.

use serde::{Deserialize, Serialize};

/// One of the five intake questions, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    Symptoms,
    Duration,
    Conditions,
    Medications,
    Allergies,
}

impl IntakeField {
    /// All fields in question order.
    pub const ALL: [IntakeField; 5] = [
        Self::Symptoms,
        Self::Duration,
        Self::Conditions,
        Self::Medications,
        Self::Allergies,
    ];

    /// Number of questions in the intake.
    pub const COUNT: usize = Self::ALL.len();

    /// Wire key of this field in the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Symptoms => "symptoms",
            Self::Duration => "duration",
            Self::Conditions => "conditions",
            Self::Medications => "medications",
            Self::Allergies => "allergies",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            Self::Symptoms => "What symptoms are you experiencing?",
            Self::Duration => "How long have you had these symptoms?",
            Self::Conditions => "Do you have any existing conditions?",
            Self::Medications => "Are you taking any medications?",
            Self::Allergies => "Any allergies?",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Symptoms => "e.g., headache, fever",
            Self::Duration => "e.g., 2 days",
            Self::Conditions => "e.g., diabetes",
            Self::Medications => "e.g., insulin",
            Self::Allergies => "e.g., penicillin",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Symptoms => "🤒",
            Self::Duration => "⏱️",
            Self::Conditions => "📋",
            Self::Medications => "💊",
            Self::Allergies => "⚠️",
        }
    }
}

impl std::fmt::Display for IntakeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The five-field symptom questionnaire payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeForm {
    pub symptoms: String,
    pub duration: String,
    pub conditions: String,
    pub medications: String,
    pub allergies: String,
}

impl IntakeForm {
    pub fn get(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::Symptoms => &self.symptoms,
            IntakeField::Duration => &self.duration,
            IntakeField::Conditions => &self.conditions,
            IntakeField::Medications => &self.medications,
            IntakeField::Allergies => &self.allergies,
        }
    }

    pub fn set(&mut self, field: IntakeField, value: impl Into<String>) {
        let slot = match field {
            IntakeField::Symptoms => &mut self.symptoms,
            IntakeField::Duration => &mut self.duration,
            IntakeField::Conditions => &mut self.conditions,
            IntakeField::Medications => &mut self.medications,
            IntakeField::Allergies => &mut self.allergies,
        };
        *slot = value.into();
    }

    /// Whether a field holds an answer. Any non-empty text counts.
    pub fn is_answered(&self, field: IntakeField) -> bool {
        !self.get(field).is_empty()
    }

    /// First field (in question order) without an answer, if any.
    pub fn first_unanswered(&self) -> Option<IntakeField> {
        IntakeField::ALL
            .into_iter()
            .find(|field| !self.is_answered(*field))
    }
}
