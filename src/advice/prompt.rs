//! Prompt construction for advice requests.

use crate::intake::{IntakeField, IntakeForm};

/// Build the advice prompt. Each field is embedded verbatim on its own line.
pub fn advice_prompt(form: &IntakeForm) -> String {
    let mut lines = vec!["User Symptoms:".to_string()];
    for field in IntakeField::ALL {
        lines.push(format!("{}: {}", label(field), form.get(field)));
    }
    lines.push(String::new());
    lines.push(
        "Give condition, medicines (with dosage and type), and advice using the schema."
            .to_string(),
    );
    lines.join("\n")
}

fn label(field: IntakeField) -> &'static str {
    match field {
        IntakeField::Symptoms => "Symptoms",
        IntakeField::Duration => "Duration",
        IntakeField::Conditions => "Conditions",
        IntakeField::Medications => "Medications",
        IntakeField::Allergies => "Allergies",
    }
}
