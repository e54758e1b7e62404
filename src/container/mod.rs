use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

mod error;
mod utils;

pub use error::{Error, Result};

/// The maximum allowed length for a [`ContainerID`].
const CONTAINER_ID_MAX_LEN: usize = 255;

/// A validated container identifier.
///
/// Identifiers end up inside cgroup paths (`docker-<id>.scope`), so only
/// lowercase ASCII letters and digits are accepted.
///
/// # Examples
///
/// ```
/// # use docker_graphite::container::ContainerID;
/// let raw_id = "abc123abc123abc123abc123abc123abc123abc123abc123abc123abc123abcd";
/// let container_id = ContainerID::new(raw_id).unwrap();
/// assert_eq!(container_id.as_ref(), raw_id);
/// assert!(ContainerID::new("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerID(Arc<str>);

impl ContainerID {
    /// Creates a new `ContainerID` from the given raw id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainerID`] if the input is empty, longer than
    /// [`CONTAINER_ID_MAX_LEN`] or contains anything but lowercase alphanumerics.
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        if src.is_empty()
            || src.len() > CONTAINER_ID_MAX_LEN
            || !utils::is_lowercase_alpha_numeric(src.as_bytes())
        {
            return Err(Error::InvalidContainerID(src.to_owned()));
        }

        Ok(Self(src.into()))
    }
}

impl AsRef<str> for ContainerID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only view of a container for one sampling cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    id: ContainerID,
    names: Vec<String>,
    env: Vec<String>,
    created: i64,
    status: String,
}

impl Container {
    pub fn new(
        id: ContainerID,
        names: Vec<String>,
        env: Vec<String>,
        created: i64,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id,
            names,
            env,
            created,
            status: status.into(),
        }
    }

    pub fn id(&self) -> &ContainerID {
        &self.id
    }

    /// All display names as reported by the engine, in reported order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first display name, or an empty string if there is none.
    pub fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }

    /// Environment entries in `KEY=VALUE` form, order and duplicates preserved.
    pub fn env(&self) -> &[String] {
        &self.env
    }

    /// Creation time in UNIX epoch seconds.
    pub fn created(&self) -> i64 {
        self.created
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Looks up an environment variable; see [`Container::env`].
    ///
    /// Returns the value of the first entry for `key`, or `""` if absent.
    pub fn env_value(&self, key: &str) -> &str {
        utils::find_value(&self.env, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_id_rejects_invalid() {
        assert!(ContainerID::new("").is_err());
        assert!(ContainerID::new("abc/def").is_err());
        assert!(ContainerID::new("ABC").is_err());
        assert!(ContainerID::new("a".repeat(256)).is_err());
    }

    #[test]
    fn test_primary_name_and_env() {
        let container = Container::new(
            ContainerID::new("abc123").unwrap(),
            vec!["/web".to_owned(), "/alias".to_owned()],
            vec!["A=1".to_owned(), "A=2".to_owned()],
            1_700_000_000,
            "Up 2 minutes",
        );
        assert_eq!(container.primary_name(), "/web");
        assert_eq!(container.env_value("A"), "1");
        assert_eq!(container.env_value("B"), "");
        assert_eq!(container.created(), 1_700_000_000);
        assert_eq!(container.status(), "Up 2 minutes");
    }

    #[test]
    fn test_primary_name_without_names() {
        let container = Container::new(
            ContainerID::new("abc123").unwrap(),
            Vec::new(),
            Vec::new(),
            0,
            "",
        );
        assert_eq!(container.primary_name(), "");
    }
}
