//! Intake state machine: one question at a time.
//!
//! States are the question indices `0..N-1` plus the terminal submit. Every
//! transition takes the state by value and returns the next one, so the web
//! layer can rebuild a state from a request, step it, and render the result.

use serde::{Deserialize, Serialize};

use super::model::{IntakeField, IntakeForm};

/// In-progress intake: the active step and the answers so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeState {
    step: usize,
    form: IntakeForm,
}

/// Outcome of [`IntakeState::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved to the next question.
    Moved(IntakeState),
    /// Active field is empty; state is unchanged.
    Blocked(IntakeState),
    /// Last question answered; the completed form is ready for transport.
    Submitted(IntakeForm),
}

impl IntakeState {
    /// Fresh intake at the first question.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state at `step` with prior answers. Out-of-range steps clamp
    /// to the last question.
    pub fn resume(step: usize, form: IntakeForm) -> Self {
        Self {
            step: step.min(IntakeField::COUNT - 1),
            form,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    /// Field the active question collects.
    pub fn current_field(&self) -> IntakeField {
        // step is kept in 0..COUNT by every constructor and transition
        IntakeField::ALL[self.step]
    }

    pub fn current_value(&self) -> &str {
        self.form.get(self.current_field())
    }

    pub fn is_last_step(&self) -> bool {
        self.step == IntakeField::COUNT - 1
    }

    /// Whether the advance affordance is enabled.
    pub fn can_advance(&self) -> bool {
        self.form.is_answered(self.current_field())
    }

    /// Fraction of the questionnaire reached, counting the active question.
    pub fn progress(&self) -> f32 {
        (self.step + 1) as f32 / IntakeField::COUNT as f32
    }

    /// Replace the active field's value (a keystroke).
    pub fn with_input(mut self, value: impl Into<String>) -> Self {
        let field = self.current_field();
        self.form.set(field, value);
        self
    }

    /// Move past the active question if it is answered.
    pub fn advance(self) -> Transition {
        if !self.can_advance() {
            return Transition::Blocked(self);
        }
        if self.is_last_step() {
            return Transition::Submitted(self.form);
        }
        Transition::Moved(Self {
            step: self.step + 1,
            form: self.form,
        })
    }

    /// Step back one question; no-op at the first.
    pub fn retreat(self) -> Self {
        Self {
            step: self.step.saturating_sub(1),
            form: self.form,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(answers: [&str; 5]) -> Transition {
        let mut state = IntakeState::new();
        for (i, answer) in answers.into_iter().enumerate() {
            state = state.with_input(answer);
            match state.advance() {
                Transition::Moved(next) => {
                    assert_eq!(next.step(), i + 1);
                    state = next;
                }
                other => return other,
            }
        }
        panic!("intake never submitted");
    }

    #[test]
    fn five_answers_submit_exactly_those_values() {
        let transition = answer_all(["headache", "2 days", "none", "insulin", "penicillin"]);
        let form = match transition {
            Transition::Submitted(form) => form,
            other => panic!("expected submit, got {other:?}"),
        };
        assert_eq!(
            form,
            IntakeForm {
                symptoms: "headache".into(),
                duration: "2 days".into(),
                conditions: "none".into(),
                medications: "insulin".into(),
                allergies: "penicillin".into(),
            }
        );
    }

    #[test]
    fn advance_with_empty_field_never_moves() {
        for step in 0..IntakeField::COUNT {
            let mut form = IntakeForm::default();
            for field in IntakeField::ALL.iter().take(step) {
                form.set(*field, "answered");
            }
            let state = IntakeState::resume(step, form);
            let state = state.with_input("");
            match state.clone().advance() {
                Transition::Blocked(same) => {
                    assert_eq!(same.step(), step);
                    assert_eq!(same, state);
                }
                other => panic!("step {step} should block, got {other:?}"),
            }
        }
    }

    #[test]
    fn whitespace_answer_advances() {
        match IntakeState::new().with_input(" ").advance() {
            Transition::Moved(next) => {
                assert_eq!(next.step(), 1);
                assert_eq!(next.form().symptoms, " ");
            }
            other => panic!("expected move, got {other:?}"),
        }
    }

    #[test]
    fn retreat_at_first_step_is_noop() {
        let state = IntakeState::new().with_input("fever");
        let back = state.clone().retreat();
        assert_eq!(back, state);
        assert_eq!(back.step(), 0);
    }

    #[test]
    fn retreat_decrements_by_one() {
        for step in 1..IntakeField::COUNT {
            let state = IntakeState::resume(step, IntakeForm::default());
            assert_eq!(state.retreat().step(), step - 1);
        }
    }

    #[test]
    fn retreat_keeps_answers() {
        let state = IntakeState::new().with_input("cough");
        let Transition::Moved(state) = state.advance() else {
            panic!("should move");
        };
        let state = state.with_input("3 weeks").retreat();
        assert_eq!(state.current_value(), "cough");
        assert_eq!(state.form().duration, "3 weeks");
    }

    #[test]
    fn input_targets_active_field_only() {
        let state = IntakeState::resume(2, IntakeForm::default()).with_input("asthma");
        assert_eq!(state.form().conditions, "asthma");
        assert!(state.form().symptoms.is_empty());
        assert_eq!(state.current_field(), IntakeField::Conditions);
    }

    #[test]
    fn resume_clamps_step() {
        let state = IntakeState::resume(42, IntakeForm::default());
        assert_eq!(state.step(), IntakeField::COUNT - 1);
        assert!(state.is_last_step());
    }

    #[test]
    fn progress_tracks_step() {
        assert!((IntakeState::new().progress() - 0.2).abs() < f32::EPSILON);
        let last = IntakeState::resume(4, IntakeForm::default());
        assert!((last.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn can_advance_reflects_current_field() {
        let state = IntakeState::new();
        assert!(!state.can_advance());
        assert!(state.with_input("rash").can_advance());
    }
}
