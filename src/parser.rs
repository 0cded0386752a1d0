use tracing::{debug, warn};

use crate::Dictionary;
use crate::error::MalformedLine;
use crate::scanner::{Line, classify};

/// How the parser treats entries that are not closed by a blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Line-for-line compatible with the lenient legacy scanner.
    ///
    /// Two quirks are kept on purpose:
    /// - a `msgid` that follows a pending entry without a blank line in
    ///   between appends to the pending key instead of starting a new one;
    /// - an entry still pending when the input ends is dropped.
    #[default]
    Legacy,
    /// Every `msgid` starts a new entry, a blank line closes any entry that
    /// has a `msgstr` (even across comments), and the last entry is kept at
    /// end of input.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Complete,
    InComment,
    InMsgId,
    InMsgStr,
}

/// Fragments of the entry currently being read
#[derive(Debug, Default)]
struct ParseBuffer {
    key_parts: Vec<String>,
    value_parts: Vec<String>,
}

impl ParseBuffer {
    fn has_value(&self) -> bool {
        !self.value_parts.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.key_parts.is_empty() && self.value_parts.is_empty()
    }

    fn clear(&mut self) {
        self.key_parts.clear();
        self.value_parts.clear();
    }

    /// Joins the fragments (no separator) into one entry and resets the buffer.
    fn flush_into(&mut self, dictionary: &mut Dictionary) {
        dictionary.add_message(self.key_parts.concat(), self.value_parts.concat());
        self.clear();
    }
}

/// Outcome of one parse call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Number of entries written into the dictionary
    pub entries: usize,
    /// Keyword lines that were skipped because their quoted string was missing
    pub diagnostics: Vec<MalformedLine>,
    /// Set when the input ended while an entry with a `msgstr` was still
    /// pending and that entry was discarded (legacy mode only)
    pub dropped_trailing_entry: bool,
}

/// Line-driven PO parser.
///
/// Parsing is best-effort and never fails: unrecognised lines are skipped,
/// malformed keyword lines are reported in the returned [`ParseReport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    mode: ParseMode,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            mode: ParseMode::Legacy,
        }
    }

    pub fn with_mode(&mut self, mode: ParseMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse `text` and add every completed entry to `dictionary`.
    pub fn parse(&self, text: &str, dictionary: &mut Dictionary) -> ParseReport {
        let strict = self.mode == ParseMode::Strict;
        let mut report = ParseReport::default();
        let mut buffer = ParseBuffer::default();
        let mut state = ScanState::Complete;

        for (index, raw) in text.split('\n').enumerate() {
            match classify(raw) {
                Line::Blank => {
                    let closes = if strict {
                        buffer.has_value()
                    } else {
                        state == ScanState::InMsgStr
                    };
                    if closes {
                        buffer.flush_into(dictionary);
                        report.entries += 1;
                        state = ScanState::Complete;
                    } else if strict {
                        state = ScanState::Complete;
                    }
                }
                Line::Comment => state = ScanState::InComment,
                Line::MsgId(payload) => {
                    if strict && !buffer.is_empty() {
                        if buffer.has_value() {
                            buffer.flush_into(dictionary);
                            report.entries += 1;
                        } else {
                            buffer.clear();
                        }
                    }
                    state = ScanState::InMsgId;
                    buffer.key_parts.push(payload.to_string());
                }
                Line::MsgStr(payload) => {
                    state = ScanState::InMsgStr;
                    buffer.value_parts.push(payload.to_string());
                }
                Line::Continuation(payload) => match state {
                    ScanState::InMsgId => buffer.key_parts.push(payload.to_string()),
                    ScanState::InMsgStr => buffer.value_parts.push(payload.to_string()),
                    ScanState::Complete | ScanState::InComment => {}
                },
                Line::Malformed(keyword) => {
                    let diagnostic = MalformedLine {
                        line_number: index + 1,
                        keyword,
                        text: raw.trim_end_matches('\r').to_string(),
                    };
                    warn!("Skipping malformed PO line: {}", diagnostic);
                    report.diagnostics.push(diagnostic);
                }
                Line::Other => {}
            }
        }

        if buffer.has_value() {
            if strict {
                buffer.flush_into(dictionary);
                report.entries += 1;
            } else {
                warn!(
                    "Input ended without a blank line; dropping pending entry '{}'",
                    buffer.key_parts.concat()
                );
                report.dropped_trailing_entry = true;
            }
        }

        debug!(
            mode = ?self.mode,
            entries = report.entries,
            diagnostics = report.diagnostics.len(),
            "Parsed PO text"
        );
        report
    }
}
