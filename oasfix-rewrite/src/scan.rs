//! Line and section scanning helpers shared by the rewrites.

use regex::Regex;

/// A line of the document together with its byte offset.
/// `text` keeps its trailing newline, if any.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub start: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn body(&self) -> &'a str {
        self.text.trim_end_matches(['\n', '\r'])
    }

    /// Body with any trailing `# comment` removed.
    pub fn code(&self) -> &'a str {
        strip_comment(self.body())
    }

    pub fn is_blank(&self) -> bool {
        self.body().trim().is_empty()
    }

    pub fn indent(&self) -> &'a str {
        let body = self.body();
        let width = body.len() - body.trim_start_matches([' ', '\t']).len();
        &body[..width]
    }
}

/// Drop a trailing YAML comment: a `#` at the start or after whitespace.
/// Quoting is not tracked.
pub(crate) fn strip_comment(text: &str) -> &str {
    let bytes = text.as_bytes();
    let hash = bytes
        .iter()
        .enumerate()
        .find(|&(i, &b)| b == b'#' && (i == 0 || matches!(bytes[i - 1], b' ' | b'\t')))
        .map(|(i, _)| i);
    match hash {
        Some(i) => text[..i].trim_end_matches([' ', '\t']),
        None => text,
    }
}

pub(crate) fn lines(text: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for chunk in text.split_inclusive('\n') {
        out.push(Line { start, text: chunk });
        start += chunk.len();
    }
    out
}

/// End of a section body that starts at `from`.
///
/// The body runs until the first `terminator` match at or after `from`, or to
/// the end of the text, not counting a single trailing newline.
pub(crate) fn section_end(text: &str, from: usize, terminator: &Regex) -> usize {
    let eof = if text.ends_with('\n') && text.len() > from {
        text.len() - 1
    } else {
        text.len()
    };

    match terminator.find_at(text, from) {
        Some(m) if m.start() < eof => m.start(),
        _ => eof,
    }
}

/// Splice `(offset, text)` insertions into `base`. Offsets refer to `base`;
/// insertions at the same offset keep their given order.
pub(crate) fn splice(base: &str, insertions: &[(usize, String)]) -> String {
    let mut ordered: Vec<&(usize, String)> = insertions.iter().collect();
    ordered.sort_by_key(|(offset, _)| *offset);

    let extra: usize = insertions.iter().map(|(_, s)| s.len()).sum();
    let mut out = String::with_capacity(base.len() + extra);
    let mut cursor = 0;
    for (offset, text) in ordered {
        out.push_str(&base[cursor..*offset]);
        out.push_str(text);
        cursor = *offset;
    }
    out.push_str(&base[cursor..]);
    out
}
