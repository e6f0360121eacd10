use serde::{Deserialize, Serialize};

/// Storage key under which the report list lives.
pub const REPORTS_KEY: &str = "communityReports";

/// Key used to address entries in a [`StateStore`](crate::StateStore).
///
/// An optional prefix lets several deployments share one backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub prefix: Option<String>,
    pub name: String,
}

impl StateKey {
    /// Create an unprefixed key.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            prefix: None,
            name: name.into(),
        }
    }

    /// The fixed key holding the persisted reports.
    #[must_use]
    pub fn reports() -> Self {
        Self::new(REPORTS_KEY)
    }

    /// Scope this key under `prefix`. An empty prefix leaves it unscoped.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Return a canonical string representation: `prefix:name`, or `name`.
    #[must_use]
    pub fn canonical(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_key_is_fixed() {
        assert_eq!(StateKey::reports().canonical(), "communityReports");
    }

    #[test]
    fn prefixed_canonical() {
        let key = StateKey::reports().with_prefix("soacha");
        assert_eq!(key.canonical(), "soacha:communityReports");
        assert_eq!(key.to_string(), "soacha:communityReports");
    }

    #[test]
    fn empty_prefix_is_ignored() {
        let key = StateKey::new("k").with_prefix("");
        assert_eq!(key.prefix, None);
        assert_eq!(key.canonical(), "k");
    }
}
