use axum::{extract::State, response::Html};

use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");

/// GET /
/// Upload form with one `<option>` per known job title.
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let options: String = state
        .reference
        .job_titles()
        .iter()
        .map(|title| {
            let escaped = escape_html(title);
            format!("<option value=\"{escaped}\">{}</option>", escape_html(&title_case(title)))
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    Html(INDEX_TEMPLATE.replace("{{job_options}}", &options))
}

/// "ui/ux designer" → "Ui/Ux Designer".
fn title_case(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut word_start = true;
    for c in title.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = !c.is_alphanumeric();
    }
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
