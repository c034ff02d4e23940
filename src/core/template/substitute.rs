//! core/template/substitute.rs
//! Build a string from a record's current values plus a running number.

use super::super::field::Field;
use super::super::types::TagRecord;
use super::token::{Key, Token, tokenize};

/// Running number settings: `start + position`, zero-padded to `digits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbering {
    pub start: u32,
    pub digits: usize,
}

impl Default for Numbering {
    fn default() -> Self {
        Self {
            start: 1,
            digits: 2,
        }
    }
}

impl Numbering {
    pub fn format(&self, position: usize) -> String {
        let n = u64::from(self.start) + position as u64;
        format!("{n:0width$}", width = self.digits)
    }
}

#[derive(Debug, Clone)]
pub struct SubstitutionTemplate {
    parts: Vec<Part>,
}

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Field(Field),
    Index,
}

impl SubstitutionTemplate {
    pub fn parse(template: &str, prefix: &str) -> Self {
        let parts = tokenize(template, prefix, false)
            .into_iter()
            .map(|token| match token {
                Token::Literal(text) => Part::Literal(unescape(&text)),
                Token::Marker { key: Key::Field(f), .. } => Part::Field(f),
                Token::Marker { key: Key::Index, .. } => Part::Index,
            })
            .collect();
        Self { parts }
    }

    /// Render for the record at `position` (0-based) in the batch.
    pub fn render(&self, record: &TagRecord, position: usize, numbering: Numbering) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field(f) => out.push_str(record.text(*f)),
                Part::Index => out.push_str(&numbering.format(position)),
            }
        }
        out
    }
}

/// `\x` -> `x` for escapes that only exist to dodge a marker (`\\` -> `\`).
/// Backslashes before anything else are kept as typed.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'\\') {
            out.push('\\');
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::fixtures::record;

    #[test]
    fn song_name_and_running_number() {
        let t = SubstitutionTemplate::parse("sn - d", "");
        let numbering = Numbering { start: 1, digits: 2 };
        let batch = [
            record("a.mp3", &[(Field::Title, "A")]),
            record("b.mp3", &[(Field::Title, "B")]),
            record("c.mp3", &[(Field::Title, "C")]),
        ];

        let got: Vec<String> = batch
            .iter()
            .enumerate()
            .map(|(i, r)| t.render(r, i, numbering))
            .collect();
        assert_eq!(got, vec!["A - 01", "B - 02", "C - 03"]);
    }

    #[test]
    fn prefixed_markers_and_missing_values() {
        let t = SubstitutionTemplate::parse(r"\kar - \kal (\kye)", r"\k");
        let r = record("x.mp3", &[(Field::Artist, "Low"), (Field::Album, "Things We Lost")]);
        assert_eq!(
            t.render(&r, 0, Numbering::default()),
            "Low - Things We Lost ()"
        );
    }

    #[test]
    fn numbering_start_and_width() {
        let n = Numbering { start: 9, digits: 3 };
        assert_eq!(n.format(0), "009");
        assert_eq!(n.format(1), "010");

        let narrow = Numbering { start: 100, digits: 1 };
        assert_eq!(narrow.format(0), "100");
    }

    #[test]
    fn file_name_marker_uses_base_name() {
        let t = SubstitutionTemplate::parse(r"\kd_\kfi", r"\k");
        let r = record("song.mp3", &[]);
        assert_eq!(t.render(&r, 4, Numbering { start: 0, digits: 1 }), "4_song.mp3");
    }

    #[test]
    fn double_backslash_collapses() {
        let t = SubstitutionTemplate::parse(r"a\\kb", r"\k");
        let r = record("x.mp3", &[]);
        assert_eq!(t.render(&r, 0, Numbering::default()), r"a\kb");
    }
}
