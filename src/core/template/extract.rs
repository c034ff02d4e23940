//! core/template/extract.rs
//! "Guess tags from file name": pull field values out of a base name.
//!
//! Model: the whole template becomes ONE regex, anchored to the whole stem.
//! Literal text between markers is regex text; each `key(pattern)` marker
//! becomes a capture group around `pattern`. `fi(...)` and `d(...)` are
//! consumed but never assigned.
//!
//! If that combined regex does not compile (typically mid-typing), each
//! marker's own pattern is searched for independently, so one broken marker
//! only blanks its own field.

use std::collections::BTreeMap;

use log::debug;
use regex::Regex;

use super::super::error::TagError;
use super::super::field::Field;
use super::token::{Key, Token, tokenize};

#[derive(Debug, Clone)]
struct Marker {
    /// `None` for consume-only markers.
    target: Option<Field>,
    pattern: String,
}

#[derive(Debug, Clone)]
pub struct ExtractionTemplate {
    markers: Vec<Marker>,
    combined: Option<Regex>,
    singles: Vec<Option<Regex>>,
    /// Why the combined regex was rejected, if it was.
    problem: Option<String>,
}

impl ExtractionTemplate {
    pub fn parse(template: &str, prefix: &str) -> Self {
        let mut markers = Vec::new();
        let mut source = String::from("^(?:");

        for token in tokenize(template, prefix, true) {
            match token {
                Token::Literal(text) => source.push_str(&text),
                Token::Marker { key, pattern } => {
                    let pattern = pattern.unwrap_or_default().to_string();
                    let target = match key {
                        Key::Field(f) if !f.is_virtual() => Some(f),
                        _ => None,
                    };
                    match target {
                        Some(_) => source.push_str(&format!("(?P<m{}>{pattern})", markers.len())),
                        None => source.push_str(&format!("(?:{pattern})")),
                    }
                    markers.push(Marker { target, pattern });
                }
            }
        }
        source.push_str(")$");

        let (combined, problem) = match Regex::new(&source) {
            Ok(re) => (Some(re), None),
            Err(e) => {
                debug!("extraction template does not compile as a whole: {e}");
                (None, Some(e.to_string()))
            }
        };

        // Only needed on the fallback path.
        let singles = if combined.is_some() {
            Vec::new()
        } else {
            markers
                .iter()
                .map(|m| {
                    Regex::new(&m.pattern)
                        .inspect_err(|e| debug!("marker pattern {:?}: {e}", m.pattern))
                        .ok()
                })
                .collect()
        };

        Self {
            markers,
            combined,
            singles,
            problem,
        }
    }

    /// Compile problem of the whole template, for a hint next to the input.
    /// Matching itself never fails: see `apply`.
    pub fn compile_error(&self) -> Option<TagError> {
        self.problem.clone().map(TagError::PatternCompile)
    }

    /// Fields this template can assign, in template order (no duplicates).
    pub fn targets(&self) -> Vec<Field> {
        let mut out: Vec<Field> = Vec::new();
        for f in self.markers.iter().filter_map(|m| m.target) {
            if !out.contains(&f) {
                out.push(f);
            }
        }
        out
    }

    /// Apply to one stem. The result holds every `Field::TAGS` entry:
    /// the captured text, or "" where nothing matched.
    pub fn apply(&self, stem: &str) -> BTreeMap<Field, String> {
        let mut out: BTreeMap<Field, String> =
            Field::TAGS.into_iter().map(|f| (f, String::new())).collect();

        match &self.combined {
            Some(re) => {
                if let Some(caps) = re.captures(stem) {
                    for (i, m) in self.markers.iter().enumerate() {
                        let Some(field) = m.target else { continue };
                        if let Some(found) = caps.name(&format!("m{i}")) {
                            assign_first(&mut out, field, found.as_str());
                        }
                    }
                }
            }
            None => {
                for (m, re) in self.markers.iter().zip(&self.singles) {
                    let (Some(field), Some(re)) = (m.target, re) else {
                        continue;
                    };
                    if let Some(found) = re.find(stem) {
                        assign_first(&mut out, field, found.as_str());
                    }
                }
            }
        }

        out
    }
}

/// Earlier markers win when one field appears twice.
fn assign_first(out: &mut BTreeMap<Field, String>, field: Field, value: &str) {
    if let Some(slot) = out.get_mut(&field) {
        if slot.is_empty() {
            *slot = value.to_string();
        }
    }
}
