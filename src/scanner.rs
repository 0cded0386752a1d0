//! Line classification for PO text.
//!
//! Each line is looked at on its own; the parser decides what a line means
//! for the entry being built.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static BLANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*$").unwrap());
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#").unwrap());
static MSGID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^msgid\s+"(.*)""#).unwrap());
static MSGSTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^msgstr\s+"(.*)""#).unwrap());
static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""(.*)""#).unwrap());

/// Directive keyword that opens an entry half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    MsgId,
    MsgStr,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::MsgId => "msgid",
            Keyword::MsgStr => "msgstr",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single line of PO text.
///
/// Payloads borrow from the line and hold the text between the first and the
/// last double quote, escapes left as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    MsgId(&'a str),
    MsgStr(&'a str),
    Continuation(&'a str),
    /// Starts with a keyword but has no quoted string after it
    Malformed(Keyword),
    Other,
}

/// Classify one line (without its trailing newline).
pub fn classify(line: &str) -> Line<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if BLANK.is_match(line) {
        return Line::Blank;
    }
    if COMMENT.is_match(line) {
        return Line::Comment;
    }

    // Keyword tests win over the bare quoted-string test.
    if line.starts_with(Keyword::MsgId.as_str()) {
        return match capture(&MSGID, line) {
            Some(payload) => Line::MsgId(payload),
            None => Line::Malformed(Keyword::MsgId),
        };
    }
    if line.starts_with(Keyword::MsgStr.as_str()) {
        return match capture(&MSGSTR, line) {
            Some(payload) => Line::MsgStr(payload),
            None => Line::Malformed(Keyword::MsgStr),
        };
    }

    match capture(&QUOTED, line) {
        Some(payload) => Line::Continuation(payload),
        None => Line::Other,
    }
}

fn capture<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
