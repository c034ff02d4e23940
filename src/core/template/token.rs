//! core/template/token.rs
//! Split a template string into literal text and markers.

use super::super::field::Field;

/// What a marker refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Field(Field),
    /// `d`: running index (substitution) / discarded delimiter (extraction).
    Index,
}

impl Key {
    /// Every key, longest spelling first so `d` never shadows a two-letter key.
    pub const ALL: [Key; 9] = [
        Key::Field(Field::FileName),
        Key::Field(Field::Title),
        Key::Field(Field::Artist),
        Key::Field(Field::Album),
        Key::Field(Field::Track),
        Key::Field(Field::Year),
        Key::Field(Field::Genre),
        Key::Field(Field::Comment),
        Key::Index,
    ];

    pub fn spelling(self) -> &'static str {
        match self {
            Key::Field(f) => f.abbreviation().unwrap_or(""),
            Key::Index => "d",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Key::Field(f) => f.label(),
            Key::Index => "Running number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Literal(String),
    Marker { key: Key, pattern: Option<&'a str> },
}

/// Tokenize `template`.
///
/// - `prefix` introduces a marker (`\k` by default; empty means bare keys).
/// - With `with_patterns`, only `key(pattern)` forms are markers and the
///   balanced parenthesised body is kept as the pattern.
/// - A backslash always travels with the character after it, so regex
///   escapes like `\d` or `\(` stay literal.
pub(crate) fn tokenize<'a>(
    template: &'a str,
    prefix: &str,
    with_patterns: bool,
) -> Vec<Token<'a>> {
    let mut out = Vec::new();
    let mut lit = String::new();
    let mut rest = template;

    while !rest.is_empty() {
        if let Some((key, after)) = match_marker(rest, prefix) {
            if !with_patterns {
                flush(&mut lit, &mut out);
                out.push(Token::Marker { key, pattern: None });
                rest = after;
                continue;
            }
            if let Some((pattern, tail)) = split_group(after) {
                flush(&mut lit, &mut out);
                out.push(Token::Marker {
                    key,
                    pattern: Some(pattern),
                });
                rest = tail;
                continue;
            }
        }

        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        lit.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                lit.push(escaped);
            }
        }
        rest = chars.as_str();
    }

    flush(&mut lit, &mut out);
    out
}

fn flush(lit: &mut String, out: &mut Vec<Token<'_>>) {
    if !lit.is_empty() {
        out.push(Token::Literal(std::mem::take(lit)));
    }
}

fn match_marker<'a>(s: &'a str, prefix: &str) -> Option<(Key, &'a str)> {
    let body = s.strip_prefix(prefix)?;
    Key::ALL
        .into_iter()
        .find_map(|key| body.strip_prefix(key.spelling()).map(|after| (key, after)))
}

/// `s` must start with `(`. Returns (inner, rest after the matching `)`).
/// Parentheses inside a `[...]` class do not count.
fn split_group(s: &str) -> Option<(&str, &str)> {
    if !s.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    // Nesting of `[...]` classes; `regex` allows `[a[bc]]`.
    let mut class = 0usize;
    // Just opened a class: a `]` (after an optional `^`) here is literal.
    let mut class_start = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if class > 0 {
            let at_start = std::mem::take(&mut class_start);
            match c {
                '\\' => escaped = true,
                '^' if at_start => class_start = true,
                ']' if at_start => {}
                '[' => {
                    class += 1;
                    class_start = true;
                }
                ']' => class -= 1,
                _ => {}
            }
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' => {
                class = 1;
                class_start = true;
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], &s[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Token<'static> {
        Token::Literal(s.to_string())
    }

    #[test]
    fn prefixed_substitution_markers() {
        let t = tokenize(r"\ktr. \ksn - \kd", r"\k", false);
        assert_eq!(
            t,
            vec![
                Token::Marker { key: Key::Field(Field::Track), pattern: None },
                lit(". "),
                Token::Marker { key: Key::Field(Field::Title), pattern: None },
                lit(" - "),
                Token::Marker { key: Key::Index, pattern: None },
            ]
        );
    }

    #[test]
    fn bare_keys_when_prefix_is_empty() {
        let t = tokenize("sn - d", "", false);
        assert_eq!(
            t,
            vec![
                Token::Marker { key: Key::Field(Field::Title), pattern: None },
                lit(" - "),
                Token::Marker { key: Key::Index, pattern: None },
            ]
        );
    }

    #[test]
    fn extraction_markers_keep_balanced_patterns() {
        let t = tokenize(r"\kal((\w+) ?)_\ksn(.+?)", r"\k", true);
        assert_eq!(
            t,
            vec![
                Token::Marker { key: Key::Field(Field::Album), pattern: Some(r"(\w+) ?") },
                lit("_"),
                Token::Marker { key: Key::Field(Field::Title), pattern: Some(".+?") },
            ]
        );
    }

    #[test]
    fn escapes_and_unbalanced_groups_stay_literal() {
        let t = tokenize(r"\d+ \kal(.+", r"\k", true);
        assert_eq!(t, vec![lit(r"\d+ \kal(.+")]);

        let t = tokenize(r"\(x\)", "", true);
        assert_eq!(t, vec![lit(r"\(x\)")]);
    }

    #[test]
    fn marker_without_group_is_literal_in_extraction() {
        let t = tokenize(r"\kal-x", r"\k", true);
        assert_eq!(t, vec![lit(r"\kal-x")]);
    }

    #[test]
    fn parens_inside_a_class_do_not_close_the_marker() {
        let t = tokenize(r"\kal([^(]+)_\ksn(.+)", r"\k", true);
        assert_eq!(
            t,
            vec![
                Token::Marker { key: Key::Field(Field::Album), pattern: Some("[^(]+") },
                lit("_"),
                Token::Marker { key: Key::Field(Field::Title), pattern: Some(".+") },
            ]
        );

        let t = tokenize(r"\kge([])(]+)", r"\k", true);
        assert_eq!(
            t,
            vec![Token::Marker { key: Key::Field(Field::Genre), pattern: Some("[])(]+") }]
        );

        let t = tokenize(r"\kal([^]\[)]+)", r"\k", true);
        assert_eq!(
            t,
            vec![Token::Marker { key: Key::Field(Field::Album), pattern: Some(r"[^]\[)]+") }]
        );
    }
}
