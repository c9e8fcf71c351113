use std::fmt;

#[derive(Debug)]
pub enum Error {
    Usage(String),
    Timestamp(chrono::ParseError),
    Gateway(gateway::Error),
    NotSignedIn,
    AdminRequired,
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Self::Timestamp(err)
    }
}

impl From<gateway::Error> for Error {
    fn from(err: gateway::Error) -> Self {
        Self::Gateway(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "usage: {message}"),
            Self::Timestamp(err) => write!(f, "invalid timestamp: {err}"),
            Self::Gateway(err) => write!(f, "{err}"),
            Self::NotSignedIn => write!(f, "not signed in, run `monitor login <user> <pass>`"),
            Self::AdminRequired => write!(f, "this command requires the admin role"),
        }
    }
}

impl std::error::Error for Error {}
