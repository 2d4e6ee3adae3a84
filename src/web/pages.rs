//! Intake page rendering.

use std::fmt::Write;

use crate::html::{escape, page};
use crate::intake::{IntakeField, IntakeState};

/// Fills the hidden `lat`/`lng` inputs when the browser grants location.
/// Denial leaves them empty, which the results view treats as no location.
const GEOLOCATION_SCRIPT: &str = "<script>\
if(navigator.geolocation){navigator.geolocation.getCurrentPosition(function(p){\
document.getElementById('lat').value=p.coords.latitude;\
document.getElementById('lng').value=p.coords.longitude;},function(){});}\
</script>";

/// Render the question page for an intake state.
pub fn render_intake(state: &IntakeState) -> String {
    let field = state.current_field();
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<h2>{} {}</h2>",
        field.icon(),
        escape(field.question())
    );
    let _ = writeln!(
        body,
        "<div class=\"progress\"><div style=\"width:{:.0}%\"></div></div>",
        state.progress() * 100.0
    );

    body.push_str("<form method=\"post\" action=\"/intake\">\n");
    let _ = writeln!(
        body,
        "<input type=\"hidden\" name=\"step\" value=\"{}\">",
        state.step()
    );
    for other in IntakeField::ALL.into_iter().filter(|f| *f != field) {
        let _ = writeln!(
            body,
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            other.key(),
            escape(state.form().get(other))
        );
    }
    if state.is_last_step() {
        body.push_str("<input type=\"hidden\" id=\"lat\" name=\"lat\" value=\"\">\n");
        body.push_str("<input type=\"hidden\" id=\"lng\" name=\"lng\" value=\"\">\n");
    }

    // `required` is the disabled affordance: the browser refuses to submit an
    // empty answer. The server gate still applies.
    let _ = writeln!(
        body,
        "<input type=\"text\" name=\"answer\" placeholder=\"{}\" value=\"{}\" required autofocus>",
        escape(field.placeholder()),
        escape(state.current_value())
    );

    body.push_str("<div class=\"actions\">\n");
    if state.step() > 0 {
        body.push_str(
            "<button type=\"submit\" name=\"action\" value=\"back\" formnovalidate>Back</button>\n",
        );
    }
    let label = if state.is_last_step() {
        "Get Medical Advice"
    } else {
        "Next"
    };
    let _ = writeln!(
        body,
        "<button class=\"next\" type=\"submit\" name=\"action\" value=\"next\">{label}</button>"
    );
    body.push_str("</div>\n</form>\n");

    if state.is_last_step() {
        body.push_str(GEOLOCATION_SCRIPT);
    }

    page("Symptom Checker", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::IntakeForm;

    #[test]
    fn first_step_has_no_back_button() {
        let html = render_intake(&IntakeState::new());
        assert!(html.contains("What symptoms are you experiencing?"));
        assert!(html.contains("placeholder=\"e.g., headache, fever\""));
        assert!(!html.contains("value=\"back\""));
        assert!(html.contains(">Next</button>"));
        assert!(html.contains("name=\"step\" value=\"0\""));
        assert!(html.contains("width:20%"));
        assert!(!html.contains("geolocation"));
    }

    #[test]
    fn last_step_offers_submit_and_location() {
        let form = IntakeForm {
            symptoms: "cough".into(),
            ..Default::default()
        };
        let html = render_intake(&IntakeState::resume(4, form));
        assert!(html.contains("Any allergies?"));
        assert!(html.contains(">Get Medical Advice</button>"));
        assert!(html.contains("value=\"back\""));
        assert!(html.contains("name=\"symptoms\" value=\"cough\""));
        assert!(html.contains("id=\"lat\""));
        assert!(html.contains("navigator.geolocation"));
        assert!(html.contains("width:100%"));
    }

    #[test]
    fn answers_are_escaped_in_hidden_fields() {
        let form = IntakeForm {
            symptoms: "\"><script>".into(),
            ..Default::default()
        };
        let html = render_intake(&IntakeState::resume(1, form));
        assert!(html.contains("name=\"symptoms\" value=\"&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn active_field_is_not_duplicated_as_hidden() {
        let state = IntakeState::new().with_input("fever");
        let html = render_intake(&state);
        assert!(!html.contains("name=\"symptoms\""));
        assert!(html.contains("name=\"answer\" placeholder=\"e.g., headache, fever\" value=\"fever\""));
    }
}
