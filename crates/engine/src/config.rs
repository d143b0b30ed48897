use dog_rescue_core::types::DEFAULT_UNDO_LIMIT;

/// Environment variable overriding the undo history bound
pub const UNDO_LIMIT_ENV: &str = "DOG_RESCUE_UNDO_LIMIT";

/// Session tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum number of undo snapshots kept; oldest are dropped first
    pub undo_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let value = std::env::var(UNDO_LIMIT_ENV).ok();
        Self {
            undo_limit: parse_undo_limit(value.as_deref()),
        }
    }

    pub fn with_undo_limit(mut self, undo_limit: usize) -> Self {
        self.undo_limit = undo_limit;
        self
    }
}

/// Trimmed integer value, or the default when absent or unparsable
pub fn parse_undo_limit(value: Option<&str>) -> usize {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_UNDO_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constant() {
        assert_eq!(SessionConfig::default().undo_limit, 50);
    }

    #[test]
    fn test_parse_undo_limit() {
        assert_eq!(parse_undo_limit(Some(" 7 ")), 7);
        assert_eq!(parse_undo_limit(Some("0")), 0);
        assert_eq!(parse_undo_limit(Some("abc")), DEFAULT_UNDO_LIMIT);
        assert_eq!(parse_undo_limit(Some("-3")), DEFAULT_UNDO_LIMIT);
        assert_eq!(parse_undo_limit(None), DEFAULT_UNDO_LIMIT);
    }

    #[test]
    fn test_with_undo_limit() {
        let config = SessionConfig::default().with_undo_limit(3);
        assert_eq!(config.undo_limit, 3);
    }
}
