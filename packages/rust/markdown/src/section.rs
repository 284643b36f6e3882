//! Structural section splitting and in-place section replacement.
//!
//! A document is a sequence of sections, each running from an ATX heading
//! line up to the next heading line. Headings inside fenced code blocks are
//! content, not structure. Offsets are byte offsets into the original text so
//! untouched regions can be copied through verbatim.

use std::ops::Range;
use std::sync::LazyLock;

use orgdash_shared::{OrgDashError, Result};
use regex::Regex;
use tracing::debug;

/// ATX heading: up to three spaces of indent, 1-6 `#`, then optional text.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*))?$").expect("valid regex")
});

/// A contiguous region of a document introduced by a heading.
///
/// Text before the first heading forms a preamble section with `level == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section {
    /// Heading level (1 for `#`, 2 for `##`, ...), 0 for the preamble.
    pub level: usize,
    /// Heading text without markers or closing hashes.
    pub title: String,
    /// Byte offset of the heading line.
    pub start: usize,
    /// Byte offset one past the section's last byte.
    pub end: usize,
}

/// Outcome of [`replace_section`].
#[derive(Debug, Clone)]
pub struct SectionReplacement {
    /// The resulting document (the input unchanged when `found` is false).
    pub document: String,
    /// Whether the target heading was present.
    pub found: bool,
    /// Byte span of the original document that was replaced.
    pub span: Option<Range<usize>>,
}

/// An open fenced code block: the fence character and its run length.
#[derive(Debug, Clone, Copy)]
struct Fence {
    ch: char,
    len: usize,
}

impl Fence {
    /// Recognize an opening fence: three or more backticks or tildes. A
    /// backtick fence's info string may not itself contain a backtick.
    fn open(line: &str) -> Option<Self> {
        let (ch, len) = fence_run(line)?;
        if ch == '`' && line[len..].contains('`') {
            return None;
        }
        Some(Self { ch, len })
    }

    /// A closing fence uses the same character, is at least as long as the
    /// opening one, and carries nothing but whitespace after it.
    fn closes(&self, line: &str) -> bool {
        match fence_run(line) {
            Some((ch, len)) => ch == self.ch && len >= self.len && line[len..].trim().is_empty(),
            None => false,
        }
    }
}

/// Leading run of backticks or tildes, if it is at least three long.
fn fence_run(line: &str) -> Option<(char, usize)> {
    let ch = line.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = line.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}

/// Split `document` into sections at every heading outside code fences.
pub(crate) fn split_sections(document: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut offset = 0;
    let mut fence: Option<Fence> = None;

    for line in document.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let content = line.trim_end_matches(['\n', '\r']);
        let trimmed = content.trim_start();

        let heading = match fence {
            Some(open) => {
                if open.closes(trimmed) {
                    fence = None;
                }
                None
            }
            None => match Fence::open(trimmed) {
                Some(open) => {
                    fence = Some(open);
                    None
                }
                None => parse_heading(content),
            },
        };

        match heading {
            Some((level, title)) => {
                if let Some(prev) = sections.last_mut() {
                    prev.end = line_start;
                }
                sections.push(Section {
                    level,
                    title,
                    start: line_start,
                    end: line_start,
                });
            }
            None if sections.is_empty() => sections.push(Section {
                level: 0,
                title: String::new(),
                start: 0,
                end: 0,
            }),
            None => {}
        }
    }

    if let Some(last) = sections.last_mut() {
        last.end = document.len();
    }

    sections
}

/// Locate the section introduced by `heading_line`.
///
/// A section matches when its heading has the same level and its title
/// starts with the marker's title, so `## Core Repositories (live)` matches
/// the marker `## Core Repositories`. The span starts at the first matching
/// heading and stops right before the newline preceding the next heading of
/// the same or a higher level, or at end of document.
pub fn find_section(document: &str, heading_line: &str) -> Result<Option<Range<usize>>> {
    let (level, title) = parse_heading(heading_line.trim_end()).ok_or_else(|| {
        OrgDashError::validation(format!("'{heading_line}' is not a Markdown heading"))
    })?;

    let sections = split_sections(document);
    let Some(index) = sections
        .iter()
        .position(|s| s.level == level && s.title.starts_with(&title))
    else {
        debug!(heading = %heading_line, "section heading not found");
        return Ok(None);
    };

    let start = sections[index].start;
    let end = match sections[index + 1..]
        .iter()
        .find(|s| s.level >= 1 && s.level <= level)
    {
        Some(next) if document[..next.start].ends_with('\n') => next.start - 1,
        Some(next) => next.start,
        None => document.len(),
    };

    Ok(Some(start..end))
}

/// Replace the section introduced by `heading_line` with `replacement`.
///
/// The span is the one [`find_section`] reports. Bytes outside it are
/// preserved exactly. A missing heading is not an error: the document comes
/// back unchanged with `found == false`.
pub fn replace_section(
    document: &str,
    heading_line: &str,
    replacement: &str,
) -> Result<SectionReplacement> {
    let Some(span) = find_section(document, heading_line)? else {
        return Ok(SectionReplacement {
            document: document.to_string(),
            found: false,
            span: None,
        });
    };

    let (start, end) = (span.start, span.end);
    let mut out = String::with_capacity(document.len() - (end - start) + replacement.len());
    out.push_str(&document[..start]);
    out.push_str(replacement);
    out.push_str(&document[end..]);

    debug!(start, end, replaced = end - start, "section replaced");

    Ok(SectionReplacement {
        document: out,
        found: true,
        span: Some(span),
    })
}

/// Parse an ATX heading line into `(level, title)`.
fn parse_heading(line: &str) -> Option<(usize, String)> {
    let caps = HEADING_RE.captures(line)?;
    let level = caps[1].len();
    let text = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some((level, strip_closing_hashes(text).to_string()))
}

/// Drop an optional closing `###` sequence (it must follow a space).
fn strip_closing_hashes(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        return text;
    }
    if without.is_empty() {
        return "";
    }
    if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}
