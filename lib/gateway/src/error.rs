use std::fmt;

use ecoguard::AlertId;

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum Error {
    Forbidden,
    Http { status: u16, body: String },
    Network(ErasedError),
    Json(serde_json::Error),
    UrlEncode(serde_urlencoded::ser::Error),
    Io(std::io::Error),
    AuthExpired,
    NoData(&'static str),
    Acknowledge(AcknowledgeFailure),
}

/// A batch acknowledgment stopped at `failed`. Alerts in `acknowledged` stay
/// acknowledged; alerts in `skipped` were never attempted.
#[derive(Debug)]
pub struct AcknowledgeFailure {
    pub acknowledged: Vec<AlertId>,
    pub failed: AlertId,
    pub skipped: Vec<AlertId>,
    pub cause: Box<Error>,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Self::UrlEncode(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<AcknowledgeFailure> for Error {
    fn from(err: AcknowledgeFailure) -> Self {
        Self::Acknowledge(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden => write!(f, "forbidden"),
            Self::Http { status, body } => write!(f, "request failed {status}: {body}"),
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::UrlEncode(err) => write!(f, "url encoding error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::AuthExpired => write!(f, "not signed in or session expired"),
            Self::NoData(what) => write!(f, "no data: {what}"),
            Self::Acknowledge(err) => write!(f, "{err}"),
        }
    }
}

impl fmt::Display for AcknowledgeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to acknowledge alert {} after {} acknowledged, {} skipped: {}",
            self.failed,
            self.acknowledged.len(),
            self.skipped.len(),
            self.cause
        )
    }
}

impl std::error::Error for Error {}
