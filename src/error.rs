/// Errors that abort a whole polling cycle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to discover containers: {0}")]
    Discovery(#[from] crate::discovery::Error),
    #[error("failed to send metrics to `{address}`: {source}")]
    Graphite {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turns a recoverable error into `None` after logging it.
///
/// Used at subsystem boundaries where a failure must not abort the rest of
/// a container's collection.
pub trait ResultOkLogExt<T, E> {
    fn ok_log_with(self, context: &str) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log_with(self, context: &str) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::warn!("{context}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_log_with_passes_values_through() {
        let ok: std::result::Result<u32, std::io::Error> = Ok(7);
        assert_eq!(ok.ok_log_with("reading"), Some(7));
    }

    #[test]
    fn test_ok_log_with_swallows_errors() {
        let err: std::result::Result<u32, std::io::Error> = Err(std::io::Error::other("boom"));
        assert_eq!(err.ok_log_with("reading"), None);
    }

    #[test]
    fn test_cycle_error_from_discovery() {
        let err = Error::from(crate::discovery::Error::InvalidEndpoint("npipe:x".to_owned()));
        assert!(err.to_string().starts_with("failed to discover containers"));
    }
}
