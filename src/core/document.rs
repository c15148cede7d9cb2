//! KnowledgeDocument - numbered sections of bullet entries
//!
//! The on-disk format is a flat text file:
//!
//! ```text
//! 1. INTRO
//! - hello
//!
//! 2. FACTS
//! - sky is blue
//! ```
//!
//! # Grammar
//! - Blocks are separated by blank lines.
//! - A block whose first line is `<integer>. <title>` opens a section.
//! - Every other non-blank line is an entry of the most recent section,
//!   or preamble text when no section has been opened yet.
//!
//! Numbers are kept exactly as found on disk. Gaps, duplicates and
//! out-of-order numbers are preserved, never renumbered.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::KbError;

/// Canonical prefix of an entry line
pub const ENTRY_MARKER: &str = "- ";

/// Title used when a section is created with a blank title
const UNTITLED: &str = "UNTITLED";

/// Where `append_entry` places a new entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppendPlacement {
    /// Before the section numbered exactly `n + 1` that follows the target,
    /// or at the end of the document when there is none.
    #[default]
    NextNumber,
    /// At the end of the target section, whatever follows it.
    NextHeader,
}

/// How `create_section` picks the new section number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionNumbering {
    /// Count of header-like lines + 1.
    #[default]
    HeaderCount,
    /// Largest existing section number + 1.
    MaxPlusOne,
}

/// A numbered, titled division of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub number: u32,
    pub title: String,
    /// Entry lines, stored with their leading marker
    pub entries: Vec<String>,
}

impl Section {
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Header line, e.g. `2. FACTS`
    pub fn header(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }

    /// Header line followed by entry lines
    pub fn to_block(&self) -> String {
        let mut block = self.header();
        for entry in &self.entries {
            block.push('\n');
            block.push_str(entry);
        }
        block
    }

    /// Entry texts with the bullet marker removed
    pub fn entry_texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| entry_text(e))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_block())
    }
}

/// Confirmation of an appended entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendedEntry {
    pub section: u32,
    pub entry: String,
}

/// Confirmation of a created section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedSection {
    pub number: u32,
    pub title: String,
}

/// Parsed knowledge base text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeDocument {
    preamble: Vec<String>,
    sections: Vec<Section>,
    trailing_newline: bool,
    /// Header-like lines in the text as read, plus sections created since
    header_like_lines: usize,
}

impl KnowledgeDocument {
    /// Parse raw knowledge base text
    pub fn parse(raw: &str) -> Self {
        let mut preamble: Vec<String> = Vec::new();
        let mut sections: Vec<Section> = Vec::new();
        let mut block_start = true;

        for line in raw.lines() {
            if line.trim().is_empty() {
                block_start = true;
                // Blank lines inside the preamble are kept (collapsed to one)
                if sections.is_empty() && preamble.last().is_some_and(|l| !l.is_empty()) {
                    preamble.push(String::new());
                }
                continue;
            }

            if block_start {
                block_start = false;
                if let Some((number, title)) = parse_header(line) {
                    sections.push(Section::new(number, title));
                    continue;
                }
            }

            match sections.last_mut() {
                Some(section) => section.entries.push(line.trim_end().to_string()),
                None => preamble.push(line.to_string()),
            }
        }

        while preamble.last().is_some_and(|l| l.is_empty()) {
            preamble.pop();
        }

        Self {
            preamble,
            sections,
            trailing_newline: raw.ends_with('\n'),
            header_like_lines: raw.lines().filter(|l| is_header_like(l)).count(),
        }
    }

    /// Serialize back to the flat text form
    pub fn serialize(&self) -> String {
        let mut blocks: Vec<String> = Vec::with_capacity(self.sections.len() + 1);
        if !self.preamble.is_empty() {
            blocks.push(self.preamble.join("\n"));
        }
        blocks.extend(self.sections.iter().map(Section::to_block));

        let mut out = blocks.join("\n\n");
        if self.trailing_newline && !out.is_empty() {
            out.push('\n');
        }
        out
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Text before the first section header
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.preamble.is_empty()
    }

    /// First section with the given number, in document order
    pub fn section(&self, number: i64) -> Option<&Section> {
        self.position(number).map(|i| &self.sections[i])
    }

    /// Look up a section from a caller-supplied identifier
    ///
    /// # Errors
    /// - `InvalidSectionNumber` if `raw` is not an integer
    /// - `SectionNotFound` if no section carries that number
    pub fn get_section(&self, raw: &str) -> Result<&Section, KbError> {
        let number = parse_section_number(raw)?;
        self.section(number).ok_or(KbError::SectionNotFound(number))
    }

    /// Add an entry to a section
    ///
    /// The document is untouched when the section does not exist.
    pub fn append_entry(
        &mut self,
        number: i64,
        text: &str,
        placement: AppendPlacement,
    ) -> Result<AppendedEntry, KbError> {
        let target = self
            .position(number)
            .ok_or(KbError::SectionNotFound(number))?;

        let host = match placement {
            AppendPlacement::NextHeader => target,
            AppendPlacement::NextNumber => {
                let next = number + 1;
                // The entry lands just before the `next` header, i.e. at the
                // end of the section preceding it.
                self.sections[target + 1..]
                    .iter()
                    .position(|s| i64::from(s.number) == next)
                    .map(|offset| target + offset)
                    .unwrap_or(self.sections.len() - 1)
            }
        };

        let entry = normalize_entry(text);
        self.sections[host]
            .entries
            .push(format!("{}{}", ENTRY_MARKER, entry).trim_end().to_string());

        Ok(AppendedEntry {
            section: self.sections[target].number,
            entry,
        })
    }

    /// Append a new, empty section at the end of the document
    pub fn create_section(&mut self, title: &str, numbering: SectionNumbering) -> CreatedSection {
        let number = match numbering {
            SectionNumbering::HeaderCount => {
                saturating_u32(self.header_like_line_count()).saturating_add(1)
            }
            SectionNumbering::MaxPlusOne => self
                .sections
                .iter()
                .map(|s| s.number)
                .max()
                .map_or(1, |max| max.saturating_add(1)),
        };

        let title = match normalize_line(title) {
            t if t.is_empty() => UNTITLED.to_string(),
            t => t.to_uppercase(),
        };

        self.sections.push(Section::new(number, title.clone()));
        self.header_like_lines += 1;
        CreatedSection { number, title }
    }

    /// Lines that start with a digit and contain `". "`
    ///
    /// Counted on the raw lines as read, so entries and preamble lines
    /// count too, an indented header does not, and `"3. "` does.
    pub fn header_like_line_count(&self) -> usize {
        self.header_like_lines
    }

    fn position(&self, number: i64) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| i64::from(s.number) == number)
    }
}

impl fmt::Display for KnowledgeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Parse a caller-supplied section identifier
pub fn parse_section_number(raw: &str) -> Result<i64, KbError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| KbError::InvalidSectionNumber(raw.to_string()))
}

/// Strip the bullet marker from an entry line
pub fn entry_text(line: &str) -> &str {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix(ENTRY_MARKER)
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed)
        .trim()
}

/// First character is a digit and the line contains `". "`
fn is_header_like(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit()) && line.contains(". ")
}

/// `<integer>. <title>` with a non-empty title
fn parse_header(line: &str) -> Option<(u32, &str)> {
    let line = line.trim();
    let digits = line.find(|c: char| !c.is_ascii_digit())?;
    if digits == 0 {
        return None;
    }

    let title = line[digits..].strip_prefix(". ")?.trim();
    if title.is_empty() {
        return None;
    }

    let number = line[..digits].parse().ok()?;
    Some((number, title))
}

/// Collapse a possibly multi-line string to one trimmed line
fn normalize_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Entry text without a caller-supplied marker, on a single line
fn normalize_entry(text: &str) -> String {
    let line = normalize_line(text);
    match line.strip_prefix(ENTRY_MARKER) {
        Some(rest) => rest.to_string(),
        None => line,
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1. INTRO\n- hello\n\n2. FACTS\n- sky is blue";

    #[test]
    fn test_parse_sections() {
        let doc = KnowledgeDocument::parse(SAMPLE);
        assert_eq!(doc.sections().len(), 2);
        assert!(doc.preamble().is_empty());

        let intro = &doc.sections()[0];
        assert_eq!(intro.number, 1);
        assert_eq!(intro.title, "INTRO");
        assert_eq!(intro.entries, vec!["- hello"]);
        assert_eq!(intro.entry_texts().collect::<Vec<_>>(), vec!["hello"]);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let text = "Rick's notes\n\n1. INTRO\n- hello\n- there\n\n3. GADGETS\n- portal gun\n\n2. FACTS\n- sky is blue\n";
        let doc = KnowledgeDocument::parse(text);
        let again = KnowledgeDocument::parse(&doc.serialize());

        assert_eq!(doc, again);
        assert_eq!(doc.serialize(), text);
        let numbers: Vec<u32> = again.sections().iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 3, 2]);
    }

    #[test]
    fn test_round_trip_normalizes_whitespace_only() {
        let text = "1. INTRO\n- hello   \n\n\n- more\n\n\n2. FACTS\n- sky is blue";
        let doc = KnowledgeDocument::parse(text);
        let again = KnowledgeDocument::parse(&doc.serialize());

        assert_eq!(again.sections().len(), 2);
        assert_eq!(again.sections()[0].entries, vec!["- hello", "- more"]);
        assert_eq!(
            doc.serialize(),
            "1. INTRO\n- hello\n- more\n\n2. FACTS\n- sky is blue"
        );
    }

    #[test]
    fn test_no_headers_keeps_preamble() {
        let text = "Just some notes.\n\nNothing numbered here.\n";
        let doc = KnowledgeDocument::parse(text);

        assert!(doc.sections().is_empty());
        assert_eq!(doc.preamble().len(), 3);
        assert_eq!(doc.serialize(), text);
    }

    #[test]
    fn test_empty_text() {
        let doc = KnowledgeDocument::parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.serialize(), "");
    }

    #[test]
    fn test_header_only_at_block_start() {
        let doc = KnowledgeDocument::parse("1. INTRO\n- a\n2. not a header\n\n2. FACTS\n- b");
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(doc.sections()[0].entries, vec!["- a", "2. not a header"]);
    }

    #[test]
    fn test_header_requires_title() {
        assert_eq!(parse_header("3. Gadgets"), Some((3, "Gadgets")));
        assert_eq!(parse_header("  12. spaced  "), Some((12, "spaced")));
        assert_eq!(parse_header("3."), None);
        assert_eq!(parse_header("3.5 apples"), None);
        assert_eq!(parse_header("- 3. bullet"), None);
        assert_eq!(parse_header("99999999999. huge"), None);
    }

    #[test]
    fn test_get_section_block() {
        let doc = KnowledgeDocument::parse(SAMPLE);
        let section = doc.get_section("2").unwrap();
        assert_eq!(section.to_block(), "2. FACTS\n- sky is blue");
    }

    #[test]
    fn test_get_section_invalid_vs_missing() {
        let doc = KnowledgeDocument::parse(SAMPLE);

        for raw in ["abc", "", "1.5", "two", "1 2"] {
            assert!(matches!(
                doc.get_section(raw),
                Err(KbError::InvalidSectionNumber(_))
            ));
        }
        assert!(matches!(
            doc.get_section("5"),
            Err(KbError::SectionNotFound(5))
        ));
        assert!(matches!(
            doc.get_section("-1"),
            Err(KbError::SectionNotFound(-1))
        ));
    }

    #[test]
    fn test_get_section_duplicate_first_wins() {
        let doc = KnowledgeDocument::parse("1. FIRST\n- a\n\n1. SECOND\n- b");
        assert_eq!(doc.get_section("1").unwrap().title, "FIRST");
    }

    #[test]
    fn test_append_entry_before_next_section() {
        let mut doc = KnowledgeDocument::parse(SAMPLE);
        let added = doc
            .append_entry(1, "world", AppendPlacement::NextNumber)
            .unwrap();

        assert_eq!(added.section, 1);
        assert_eq!(added.entry, "world");
        assert_eq!(
            doc.serialize(),
            "1. INTRO\n- hello\n- world\n\n2. FACTS\n- sky is blue"
        );
    }

    #[test]
    fn test_append_entry_to_last_section() {
        let mut doc = KnowledgeDocument::parse(SAMPLE);
        doc.append_entry(2, "grass is green", AppendPlacement::NextNumber)
            .unwrap();
        assert_eq!(
            doc.sections()[1].entries,
            vec!["- sky is blue", "- grass is green"]
        );
    }

    #[test]
    fn test_append_entry_gap_goes_to_end() {
        let mut doc = KnowledgeDocument::parse("1. A\n- a\n\n3. C\n- c");
        doc.append_entry(1, "new", AppendPlacement::NextNumber)
            .unwrap();
        assert_eq!(doc.serialize(), "1. A\n- a\n\n3. C\n- c\n- new");
    }

    #[test]
    fn test_append_entry_gap_next_header() {
        let mut doc = KnowledgeDocument::parse("1. A\n- a\n\n3. C\n- c");
        doc.append_entry(1, "new", AppendPlacement::NextHeader)
            .unwrap();
        assert_eq!(doc.serialize(), "1. A\n- a\n- new\n\n3. C\n- c");
    }

    #[test]
    fn test_append_entry_out_of_order() {
        // "2." follows "3." on disk: the entry goes right before "2."
        let mut doc = KnowledgeDocument::parse("1. A\n\n3. C\n- c\n\n2. B\n- b");
        doc.append_entry(1, "x", AppendPlacement::NextNumber)
            .unwrap();
        assert_eq!(doc.serialize(), "1. A\n\n3. C\n- c\n- x\n\n2. B\n- b");
    }

    #[test]
    fn test_append_entry_missing_section() {
        let mut doc = KnowledgeDocument::parse(SAMPLE);
        let before = doc.clone();

        let err = doc
            .append_entry(9, "nope", AppendPlacement::NextNumber)
            .unwrap_err();
        assert!(matches!(err, KbError::SectionNotFound(9)));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_append_entry_normalizes_text() {
        let mut doc = KnowledgeDocument::parse(SAMPLE);
        let added = doc
            .append_entry(2, "- multi\nline  entry ", AppendPlacement::NextNumber)
            .unwrap();
        assert_eq!(added.entry, "multi line entry");
        assert_eq!(doc.sections()[1].entries.last().unwrap(), "- multi line entry");
    }

    #[test]
    fn test_create_section_counts_headers() {
        let mut doc = KnowledgeDocument::parse(SAMPLE);
        let created = doc.create_section("intro", SectionNumbering::HeaderCount);

        assert_eq!(created.number, 3);
        assert_eq!(created.title, "INTRO");
        assert_eq!(
            doc.serialize(),
            "1. INTRO\n- hello\n\n2. FACTS\n- sky is blue\n\n3. INTRO"
        );
        assert!(doc.sections()[2].entries.is_empty());
    }

    #[test]
    fn test_create_section_count_quirk() {
        // Gap in numbering plus a digit-led entry: count is 3, so the new
        // section is numbered 4 even though the max is 5.
        let mut doc = KnowledgeDocument::parse("1. A\n42. is. the answer\n\n5. E\n- e");
        assert_eq!(doc.header_like_line_count(), 3);
        assert_eq!(doc.create_section("x", SectionNumbering::HeaderCount).number, 4);
    }

    #[test]
    fn test_header_count_uses_raw_lines() {
        // Indented header is parsed but not counted; a bare "3. " is counted
        let mut doc = KnowledgeDocument::parse(" 1. A\n- a\n3. \n\n2. B\n- b");
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(doc.header_like_line_count(), 2);
        assert_eq!(doc.create_section("c", SectionNumbering::HeaderCount).number, 3);
        assert_eq!(doc.header_like_line_count(), 3);
        assert_eq!(doc.create_section("d", SectionNumbering::HeaderCount).number, 4);
    }

    #[test]
    fn test_create_section_max_plus_one() {
        let mut doc = KnowledgeDocument::parse("1. A\n\n5. E\n\n3. C");
        let created = doc.create_section("next", SectionNumbering::MaxPlusOne);
        assert_eq!(created.number, 6);

        let mut empty = KnowledgeDocument::parse("");
        assert_eq!(empty.create_section("first", SectionNumbering::MaxPlusOne).number, 1);
    }

    #[test]
    fn test_create_section_on_empty_document() {
        let mut doc = KnowledgeDocument::parse("");
        let created = doc.create_section("  space  travel ", SectionNumbering::HeaderCount);
        assert_eq!(created.number, 1);
        assert_eq!(created.title, "SPACE TRAVEL");
        assert_eq!(doc.serialize(), "1. SPACE TRAVEL");
    }

    #[test]
    fn test_create_section_blank_title() {
        let mut doc = KnowledgeDocument::parse(SAMPLE);
        let created = doc.create_section("   ", SectionNumbering::HeaderCount);
        assert_eq!(created.title, UNTITLED);

        let reparsed = KnowledgeDocument::parse(&doc.serialize());
        assert_eq!(reparsed.sections().len(), 3);
    }

    #[test]
    fn test_create_section_keeps_trailing_newline() {
        let mut doc = KnowledgeDocument::parse("1. A\n- a\n");
        doc.create_section("b", SectionNumbering::HeaderCount);
        assert_eq!(doc.serialize(), "1. A\n- a\n\n2. B\n");
    }

    #[test]
    fn test_title_case_preserved_on_read() {
        let doc = KnowledgeDocument::parse("1. Mixed Case\n- a");
        assert_eq!(doc.sections()[0].title, "Mixed Case");
    }

    #[test]
    fn test_entry_text() {
        assert_eq!(entry_text("- hello"), "hello");
        assert_eq!(entry_text("  - nested"), "nested");
        assert_eq!(entry_text("-tight"), "tight");
        assert_eq!(entry_text("plain line"), "plain line");
    }
}
