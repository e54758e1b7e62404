use std::fmt;

/// A single sampled value, named by a dot-delimited hierarchical path.
///
/// Values are kept in the textual form they were read in; no numeric
/// conversion happens between the kernel and the metrics backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricRecord {
    name: String,
    value: String,
}

impl MetricRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Builds a record named `<prefix>.<key>`.
    pub fn prefixed(prefix: &str, key: &str, value: impl Into<String>) -> Self {
        Self::new(format!("{prefix}.{key}"), value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for MetricRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
