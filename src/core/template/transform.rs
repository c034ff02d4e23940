//! Single-field value modes (no template except `Custom`).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMode {
    #[default]
    Keep,
    Lowercase,
    Uppercase,
    /// First character upper-cased, the rest lower-cased.
    Capitalize,
    /// Value comes from a substitution template.
    Custom,
}

impl ValueMode {
    pub const ALL: [ValueMode; 5] = [
        ValueMode::Keep,
        ValueMode::Lowercase,
        ValueMode::Uppercase,
        ValueMode::Capitalize,
        ValueMode::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ValueMode::Keep => "Keep value",
            ValueMode::Lowercase => "lowercase",
            ValueMode::Uppercase => "UPPERCASE",
            ValueMode::Capitalize => "Capitalize",
            ValueMode::Custom => "Custom template",
        }
    }

    /// Apply a simple mode. `None` for `Custom`, which needs a template.
    pub fn apply(self, value: &str) -> Option<String> {
        match self {
            ValueMode::Keep => Some(value.to_string()),
            ValueMode::Lowercase => Some(value.to_lowercase()),
            ValueMode::Uppercase => Some(value.to_uppercase()),
            ValueMode::Capitalize => Some(capitalize(value)),
            ValueMode::Custom => None,
        }
    }
}

impl std::fmt::Display for ValueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_modes() {
        assert_eq!(ValueMode::Keep.apply("Hey Jude").unwrap(), "Hey Jude");
        assert_eq!(ValueMode::Lowercase.apply("Hey Jude").unwrap(), "hey jude");
        assert_eq!(ValueMode::Uppercase.apply("The Beatles").unwrap(), "THE BEATLES");
        assert_eq!(ValueMode::Capitalize.apply("hEY jUDE").unwrap(), "Hey jude");
        assert_eq!(ValueMode::Capitalize.apply("").unwrap(), "");
        assert_eq!(ValueMode::Uppercase.apply("žluťoučký").unwrap(), "ŽLUŤOUČKÝ");
        assert_eq!(ValueMode::Custom.apply("x"), None);
    }
}
