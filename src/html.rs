//! Minimal HTML building blocks shared by the intake and results pages.

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;background:#eef1ff;margin:0;padding:2rem;}\
main{max-width:800px;margin:0 auto;background:#fff;padding:2rem;border-radius:20px;}\
h2{color:#4338ca;text-align:center;}\
.progress{height:6px;background:#e5e7eb;border-radius:3px;margin-bottom:2rem;}\
.progress>div{height:100%;background:#4338ca;border-radius:3px;}\
input[type=text]{width:100%;padding:1rem;font-size:1.1rem;box-sizing:border-box;}\
.actions{display:flex;gap:1rem;margin-top:2rem;}\
.actions .next{margin-left:auto;}\
.card{padding:1rem;background:#f9fafb;margin-bottom:1rem;border-radius:12px;}\
.error{color:#b91c1c;}\
.disclaimer{margin-top:2rem;text-align:center;font-size:.9rem;color:#6b7280;}";

/// Wrap body markup in a complete document.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn page_escapes_title() {
        let html = page("<b>", "<p>ok</p>");
        assert!(html.contains("<title>&lt;b&gt;</title>"));
        assert!(html.contains("<p>ok</p>"));
    }
}
