#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid docker endpoint `{0}`, expected `unix:<path>` or `tcp:<host>:<port>`")]
    InvalidEndpoint(String),
    #[error("failed to connect to `{endpoint}`: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build request for `{path}`: {source}")]
    Request {
        path: String,
        #[source]
        source: hyper::http::Error,
    },
    #[error("http error: {0}")]
    Http(#[from] hyper::Error),
    #[error("request `{path}` failed with status {status}: {body}")]
    Status {
        path: String,
        status: hyper::StatusCode,
        body: String,
    },
    #[error("failed to decode response of `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
