use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MONKEY_ID_RE: Regex = Regex::new(r"^monk-\d{3}$").unwrap();
}

/// A validated monkey identifier (`monk-` followed by exactly three digits).
///
/// Construction is the only gate: a `MonkeyId` in hand is known to match the
/// pattern, so it can safely be bound into queries without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonkeyId(String);

impl MonkeyId {
    pub fn parse(raw: &str) -> Option<Self> {
        MONKEY_ID_RE.is_match(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MonkeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_ids() {
        assert!(MonkeyId::parse("monk-001").is_some());
        assert!(MonkeyId::parse("monk-999").is_some());
    }

    #[test]
    fn rejects_everything_else() {
        for bad in [
            "",
            "abc",
            "monk-1",
            "monk-12",
            "monk-1234",
            "monk-abc",
            "MONK-001",
            " monk-001",
            "monk-001 ",
            "monk-001'; DROP TABLE monkeys; --",
        ] {
            assert!(MonkeyId::parse(bad).is_none(), "accepted {bad:?}");
        }
    }
}
