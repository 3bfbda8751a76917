use thiserror::Error;

/// Errors surfaced by the client.
///
/// Nothing is retried or swallowed internally; every variant reaches the
/// caller directly. The only recovery behavior in the crate is the proactive
/// ticket renewal, which happens before a request is built, not in response
/// to one of these errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The ticket endpoint answered with a non-success status.
    #[error("authentication failed: {body}")]
    Authentication { body: String },

    /// An API call answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded into the expected
    /// `{"data": ...}` envelope.
    #[error("malformed response: {context}")]
    MalformedResponse { context: String },

    /// The request never produced an HTTP status (DNS, connect, I/O).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// TLS connector construction failed.
    #[error("TLS setup failed: {message}")]
    Tls { message: String },

    /// A configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
