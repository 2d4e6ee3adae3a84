//! HTML rendering of the results view. No logic beyond presentation.

use std::fmt::Write;

use super::view::ResultsView;
use crate::html::{escape, page};

pub const DISCLAIMER: &str = "This is AI-generated advice. Always consult a licensed physician.";

/// Fills the hidden provider section from `/api/providers` using the page's
/// own `lat`/`lng`. The section stays hidden when nothing comes back.
const PENDING_PROVIDERS_SCRIPT: &str = "<script>\
(function(){var q=new URLSearchParams(location.search);\
var lat=parseFloat(q.get('lat')),lng=parseFloat(q.get('lng'));\
if(isNaN(lat)||isNaN(lng))return;\
fetch('/api/providers',{method:'POST',headers:{'Content-Type':'application/json'},\
body:JSON.stringify({lat:lat,lng:lng})}).then(function(r){return r.json();})\
.then(function(list){if(!list.length)return;var s=document.getElementById('providers');\
list.forEach(function(p){var d=document.createElement('div');d.className='card provider';\
[p.name,p.vicinity].forEach(function(t){var e=document.createElement('p');e.textContent=t;d.appendChild(e);});\
if(p.rating!=null){var r=document.createElement('p');r.textContent='Rating: \u{2b50} '+p.rating;d.appendChild(r);}\
s.appendChild(d);});s.hidden=false;}).catch(function(){});})();\
</script>";

/// Render the complete results page for a view.
pub fn render_results(view: &ResultsView) -> String {
    let mut body = String::from("<h2>Medical Analysis Results</h2>\n");

    match view {
        ResultsView::Loading => {
            body.push_str("<p class=\"loading\">Analyzing your symptoms...</p>\n");
        }
        ResultsView::Error { message } => {
            let _ = writeln!(body, "<p class=\"error\" role=\"alert\">{}</p>", escape(message));
        }
        ResultsView::Ready {
            advice,
            providers,
            providers_pending,
        } => {
            body.push_str("<section class=\"condition\">\n<h3>Likely Condition</h3>\n");
            let _ = writeln!(body, "<p>{}</p>", escape(&advice.condition));
            if let Some(table) = &advice.table_name {
                let _ = writeln!(
                    body,
                    "<p><strong>Diagnostic Table:</strong> {}</p>",
                    escape(table)
                );
            }
            body.push_str("</section>\n");

            body.push_str("<section class=\"medicines\">\n<h3>Recommended Medicines</h3>\n");
            for medicine in &advice.medicines {
                let _ = writeln!(
                    body,
                    "<div class=\"card medicine\"><p><strong>{}</strong></p><p>Dosage: {}</p><p>Type: {}</p></div>",
                    escape(&medicine.name),
                    escape(&medicine.dosage),
                    escape(&medicine.kind),
                );
            }
            body.push_str("</section>\n");

            body.push_str("<section class=\"advice\">\n<h3>Important Advice</h3>\n");
            let _ = writeln!(body, "<p>{}</p>", escape(&advice.advice));
            body.push_str("</section>\n");

            if !providers.is_empty() {
                body.push_str("<section class=\"providers\">\n<h3>Nearby Doctors</h3>\n");
                for provider in providers {
                    let _ = write!(
                        body,
                        "<div class=\"card provider\"><p><strong>{}</strong></p><p>{}</p>",
                        escape(&provider.name),
                        escape(&provider.vicinity),
                    );
                    if let Some(rating) = provider.rating {
                        let _ = write!(body, "<p>Rating: ⭐ {rating}</p>");
                    }
                    body.push_str("</div>\n");
                }
                body.push_str("</section>\n");
            } else if *providers_pending {
                body.push_str(
                    "<section class=\"providers\" id=\"providers\" hidden>\n<h3>Nearby Doctors</h3>\n</section>\n",
                );
                body.push_str(PENDING_PROVIDERS_SCRIPT);
                body.push('\n');
            }

            let _ = writeln!(body, "<p class=\"disclaimer\">{DISCLAIMER}</p>");
        }
    }

    body.push_str("<p><a class=\"back\" href=\"/\">Back to Symptom Checker</a></p>");
    page("Medical Analysis Results", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::{AdviceResult, Medicine};
    use crate::places::ProviderEntry;

    fn migraine() -> AdviceResult {
        AdviceResult {
            condition: "Migraine".into(),
            table_name: None,
            medicines: vec![Medicine {
                name: "Paracetamol".into(),
                dosage: "500mg".into(),
                kind: "tablet".into(),
            }],
            advice: "Rest and hydrate.".into(),
        }
    }

    #[test]
    fn ready_shows_condition_and_one_medicine_row() {
        let html = render_results(&ResultsView::Ready {
            advice: migraine(),
            providers: vec![],
            providers_pending: false,
        });
        assert!(html.contains("<p>Migraine</p>"));
        assert_eq!(html.matches("class=\"card medicine\"").count(), 1);
        assert!(html.contains("Dosage: 500mg"));
        assert!(html.contains("Type: tablet"));
        assert!(html.contains("Rest and hydrate."));
        assert!(html.contains(DISCLAIMER));
        assert!(!html.contains("Nearby Doctors"));
        assert!(!html.contains("role=\"alert\""));
        assert!(!html.contains("Diagnostic Table"));
    }

    #[test]
    fn providers_and_rating_render_when_present() {
        let mut advice = migraine();
        advice.table_name = Some("Neurology".into());
        let html = render_results(&ResultsView::Ready {
            advice,
            providers: vec![
                ProviderEntry {
                    name: "City Clinic".into(),
                    vicinity: "1 Main St".into(),
                    rating: Some(4.5),
                },
                ProviderEntry {
                    name: "Town Surgery".into(),
                    vicinity: "2 High St".into(),
                    rating: None,
                },
            ],
            providers_pending: false,
        });
        assert!(html.contains("Nearby Doctors"));
        assert_eq!(html.matches("class=\"card provider\"").count(), 2);
        assert_eq!(html.matches("Rating:").count(), 1);
        assert!(html.contains("Rating: ⭐ 4.5"));
        assert!(html.contains("<strong>Diagnostic Table:</strong> Neurology"));
    }

    #[test]
    fn error_view_shows_message_only() {
        let html = render_results(&ResultsView::Error {
            message: "Something went wrong: <boom>".into(),
        });
        assert!(html.contains("role=\"alert\">Something went wrong: &lt;boom&gt;</p>"));
        assert!(!html.contains("Likely Condition"));
        assert!(html.contains("Back to Symptom Checker"));
    }

    #[test]
    fn loading_view() {
        let html = render_results(&ResultsView::Loading);
        assert!(html.contains("Analyzing your symptoms..."));
    }

    #[test]
    fn model_output_is_escaped() {
        let mut advice = migraine();
        advice.condition = "<script>alert(1)</script>".into();
        let html = render_results(&ResultsView::Ready {
            advice,
            providers: vec![],
            providers_pending: false,
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn pending_lookup_renders_advice_and_deferred_section() {
        let html = render_results(&ResultsView::Ready {
            advice: migraine(),
            providers: vec![],
            providers_pending: true,
        });
        assert!(html.contains("<p>Migraine</p>"));
        assert!(html.contains("id=\"providers\" hidden"));
        assert!(html.contains("fetch('/api/providers'"));
        assert_eq!(html.matches("class=\"card provider\"").count(), 0);
        assert!(!html.contains("role=\"alert\""));
    }
}
