use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::Error;

/// Address of the Docker Engine API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerEndpoint {
    Unix(PathBuf),
    Tcp(String),
}

impl FromStr for DockerEndpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidEndpoint(s.to_owned());
        let (scheme, address) = s.split_once(':').ok_or_else(invalid)?;
        let address = address.trim_start_matches("//");
        if address.is_empty() {
            return Err(invalid());
        }

        match scheme {
            "unix" => Ok(Self::Unix(PathBuf::from(address))),
            "tcp" if address.contains(':') => Ok(Self::Tcp(address.to_owned())),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for DockerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix:{}", path.display()),
            Self::Tcp(address) => write!(f, "tcp:{address}"),
        }
    }
}
