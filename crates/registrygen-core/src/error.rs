use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("catalog {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("catalog {url} is not a registry document: {reason}")]
    Decode { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
