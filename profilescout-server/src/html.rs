//! Search page rendering

use profilescout::{Candidate, SearchOutcome};
use std::fmt::Write;

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Profile Search</title>
    <style>
        body {
            max-width: 760px;
            margin: 2rem auto;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            color: #222;
        }
        form { display: flex; gap: 0.5rem; margin-bottom: 1.5rem; }
        input[type=text] { flex: 1; padding: 0.5rem; font-size: 1rem; }
        button { padding: 0.5rem 1rem; }
        .warning { background: #fff4d6; padding: 0.75rem; border-radius: 4px; }
        .error { background: #fde2e1; padding: 0.75rem; border-radius: 4px; }
        .success { background: #e3f6e5; padding: 0.75rem; border-radius: 4px; }
        .card { border-bottom: 1px solid #ddd; padding: 0.75rem 0; }
        .card h3 { margin: 0 0 0.25rem 0; }
        .card p { margin: 0.15rem 0; }
        .caption { color: #666; }
    </style>
</head>
<body>
    <h1>Profile Search</h1>
    <p class="caption">Search candidate profiles using semantic similarity.</p>
"##;

const PAGE_TAIL: &str = "</body>\n</html>\n";

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

fn form(query: &str) -> String {
    format!(
        "    <form method=\"get\" action=\"/\">\n        \
         <input type=\"text\" name=\"q\" placeholder=\"Enter skills, roles, or keywords\" value=\"{}\">\n        \
         <button type=\"submit\">Search</button>\n    </form>\n",
        escape(query)
    )
}

fn card(out: &mut String, rank: usize, c: &Candidate) {
    let _ = write!(
        out,
        "    <div class=\"card\">\n        <h3>Result {}</h3>\n",
        rank
    );
    for (label, key) in [
        ("Name", "name"),
        ("Email", "email"),
        ("Location", "location"),
        ("Skills", "skills"),
    ] {
        let _ = writeln!(
            out,
            "        <p><b>{}:</b> {}</p>",
            label,
            escape(&c.field(key))
        );
    }
    let _ = writeln!(
        out,
        "        <p><b>Experience:</b> {} years</p>",
        escape(&c.field("experience_years"))
    );
    let _ = writeln!(
        out,
        "        <p><b>Summary:</b> {}</p>\n    </div>",
        escape(&c.field("summary"))
    );
}

/// Empty form, no search yet
pub fn render_form() -> String {
    format!("{}{}{}", PAGE_HEAD, form(""), PAGE_TAIL)
}

pub fn render_outcome(query: &str, outcome: &SearchOutcome) -> String {
    let mut out = String::from(PAGE_HEAD);
    out.push_str(&form(query));

    match outcome {
        SearchOutcome::ValidationError { message } => {
            let _ = writeln!(out, "    <p class=\"warning\">{}</p>", escape(message));
        }
        SearchOutcome::NoResults { .. } => {
            out.push_str(
                "    <p class=\"error\">No matching profiles found with the given experience.</p>\n",
            );
        }
        SearchOutcome::Results {
            threshold,
            profiles,
            total_matches,
            ..
        } => {
            let filter_note = match threshold {
                Some(t) => format!(" (more than {} years experience)", t),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "    <p class=\"success\">Found {} Matching Profiles{}</p>",
                total_matches, filter_note
            );
            for (i, c) in profiles.iter().enumerate() {
                card(&mut out, i + 1, c);
            }
        }
    }

    out.push_str(PAGE_TAIL);
    out
}

/// Page for a search that failed outright
pub fn render_failure(query: &str) -> String {
    format!(
        "{}{}    <p class=\"error\">Search failed. Please try again.</p>\n{}",
        PAGE_HEAD,
        form(query),
        PAGE_TAIL
    )
}
