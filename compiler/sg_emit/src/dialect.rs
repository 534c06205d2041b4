use std::fmt;

/// A target source dialect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    Java,
    Kotlin,
    Groovy,
}

impl Dialect {
    pub const ALL: &'static [Dialect] = &[Dialect::Java, Dialect::Kotlin, Dialect::Groovy];

    /// Parse a dialect identifier, case-insensitively.
    pub fn from_name(s: &str) -> Option<Dialect> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Some(Dialect::Java),
            "kotlin" | "kt" => Some(Dialect::Kotlin),
            "groovy" => Some(Dialect::Groovy),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Java => "java",
            Dialect::Kotlin => "kotlin",
            Dialect::Groovy => "groovy",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &dialect in Dialect::ALL {
            assert_eq!(Dialect::from_name(dialect.name()), Some(dialect));
        }
        assert_eq!(Dialect::from_name("KT"), Some(Dialect::Kotlin));
        assert_eq!(Dialect::from_name("scala"), None);
    }
}
