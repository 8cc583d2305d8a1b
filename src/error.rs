use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ServerError {
    /// The listener could not be bound. Fatal: the caller is expected to
    /// print this and exit non-zero.
    Bind { addr: String, source: io::Error },
    /// A transport-level error on a single connection.
    Io(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind { addr, source } => {
                write!(f, "failed to bind {}: {}", addr, source)
            }
            ServerError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind { source, .. } => Some(source),
            ServerError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ServerError {
    fn from(err: io::Error) -> Self {
        ServerError::Io(err)
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
