//! Parsing of model output into subject and body.
//!
//! Deliberately permissive: a response that ignores the requested shape still
//! yields something usable (line one becomes the subject verbatim) rather
//! than an error.

use coldreach_core::SenderProfile;

use super::prompt::SUBJECT_MARKER;

/// Split model output into `(subject, body)`.
///
/// The first line, minus a leading `Subject:` marker if present, becomes the
/// subject; everything after is rejoined as the body. Both are trimmed.
pub fn parse_email_text(text: &str) -> (String, String) {
    let trimmed = text.trim();
    let mut lines = trimmed.lines();

    let first = lines.next().unwrap_or_default();
    let subject = strip_marker(first).trim().to_string();
    let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    (subject, body)
}

/// Substitute the signature placeholders the prompt asks the model to use
/// when no real contact details were supplied.
///
/// When the sender has no phone/website this is a no-op: the accessor
/// returns the placeholder itself.
pub fn substitute_placeholders(body: &str, sender: &SenderProfile) -> String {
    body.replace("[Phone Number]", sender.phone()).replace("[Website]", sender.website())
}

fn strip_marker(line: &str) -> &str {
    // get() rather than indexing: the marker length may fall inside a
    // multibyte character when the model answers in another language.
    match line.get(..SUBJECT_MARKER.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(SUBJECT_MARKER) => &line[SUBJECT_MARKER.len()..],
        _ => line,
    }
}
