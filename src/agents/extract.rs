//! Turns a model completion into a list of new tasks.
//!
//! The task prompts ask for a numbered list, one task per line. Models drift
//! from that format, so the parser also accepts bullets, checkboxes, a JSON
//! array of strings, and a line of commentary around the list.
//!
//! Rules, applied in order:
//! 1. If a non-empty JSON array of strings starts a line and nothing else
//!    follows it on its closing line, its elements are the candidates.
//!    Otherwise every line is a candidate, so an array quoted inside a
//!    numbered task stays part of that task.
//! 2. One bullet, one checkbox and one numbering marker are removed from the
//!    front, in that order, along with wrapping quotes and trailing commas.
//! 3. In line mode, once any line carries a list marker, unmarked lines are
//!    treated as commentary and dropped.
//! 4. Empty candidates and "no more tasks" / "task complete" sentinels are
//!    dropped.
//! 5. Candidates matching a completed task, or a task already emitted from
//!    this completion, are dropped. Matching ignores case and runs of
//!    whitespace.
//!
//! Surviving tasks keep the order in which they first appeared.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:[-*+•]\s+)?",
        r"(?:\[[ x]\]\s+)?",
        r"(?:\(\d{1,3}\)\s*|\d{1,3}[.):](?:\s+|$)|task\s*\d{1,3}\s*[:.)-]\s+)?",
    ))
    .expect("list marker regex is valid")
});

static SENTINEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"(?:there\s+are\s+)?no\s+(?:(?:more|new|further|additional|other|remaining)\s+)?tasks?\b",
        r"|(?:all\s+)?(?:the\s+)?tasks?\s+(?:(?:is|are|has\s+been|have\s+been)\s+)?(?:complete|completed|done|finished)\b",
        r"|(?:the\s+)?(?:objective|goal)\s+(?:is\s+|has\s+been\s+)?(?:complete|completed|achieved|reached)\b",
        r")",
    ))
    .expect("sentinel regex is valid")
});

/// Extract new tasks from `raw`, skipping anything already in `completed`.
pub fn extract_tasks(raw: &str, completed: &[String]) -> Vec<String> {
    let candidates = match json_array(raw) {
        Some(items) => items
            .iter()
            .map(|item| clean_candidate(item).0)
            .collect::<Vec<_>>(),
        None => line_candidates(raw),
    };

    let mut seen: HashSet<String> = completed.iter().map(|t| normalize(t)).collect();
    let mut tasks = Vec::new();

    for candidate in candidates {
        if candidate.is_empty() || is_sentinel(&candidate) {
            continue;
        }
        if seen.insert(normalize(&candidate)) {
            tasks.push(candidate);
        }
    }

    tasks
}

/// Comparison key: lowercase with whitespace runs collapsed.
pub fn normalize(task: &str) -> String {
    task.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether the line announces that there is nothing left to do.
pub fn is_sentinel(line: &str) -> bool {
    SENTINEL.is_match(&normalize(line))
}

/// First array of strings that opens a line and closes at the end of a line.
fn json_array(raw: &str) -> Option<Vec<String>> {
    let mut line_start = 0;
    for line in raw.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let start = line_start + indent;
        line_start += line.len();

        if !raw[start..].starts_with('[') {
            continue;
        }
        let Some(end) = closing_bracket(&raw[start..]).map(|len| start + len) else {
            continue;
        };
        let rest_of_line = raw[end..].split('\n').next().unwrap_or_default();
        if !rest_of_line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Vec<String>>(&raw[start..end]) {
            Ok(items) if !items.is_empty() => return Some(items),
            _ => continue,
        }
    }
    None
}

/// Byte length of the bracketed span opening `text`, honouring JSON strings.
fn closing_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn line_candidates(raw: &str) -> Vec<String> {
    let lines: Vec<(String, bool)> = raw.lines().map(clean_candidate).collect();
    let any_marked = lines.iter().any(|(_, marked)| *marked);

    lines
        .into_iter()
        .filter(|(_, marked)| *marked || !any_marked)
        .map(|(text, _)| text)
        .collect()
}

/// Strip decoration from one candidate. Returns the text and whether a list
/// marker was found.
fn clean_candidate(raw: &str) -> (String, bool) {
    let mut text = raw.trim();
    let mut marked = false;

    if let Some(m) = LIST_MARKER.find(text) {
        if !m.as_str().is_empty() {
            text = text[m.end()..].trim_start();
            marked = true;
        }
    }

    let mut text = text.trim_end().trim_end_matches(',').trim_end();
    for quote in ['"', '\'', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = text[1..text.len() - 1].trim();
            break;
        }
    }

    (text.to_string(), marked)
}
