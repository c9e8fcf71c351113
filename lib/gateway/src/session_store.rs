use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use ecoguard::AuthSession;
use log::debug;

/// The single locally persisted auth record.
///
/// Reads never fail: a missing, unreadable or malformed record is simply no
/// session. There is no atomicity between reading a session and using it.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<AuthSession>;
    fn set(&self, session: &AuthSession) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

fn decode(raw: &str) -> Option<AuthSession> {
    match serde_json::from_str::<AuthSession>(raw) {
        Ok(session) if session.is_valid() => Some(session),
        Ok(_) => {
            debug!("ignoring stored session with an empty token");
            None
        }
        Err(err) => {
            debug!("ignoring malformed stored session: {err}");
            None
        }
    }
}

fn encode(session: &AuthSession) -> io::Result<String> {
    if !session.is_valid() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "session token is empty",
        ));
    }

    Ok(serde_json::to_string(session)?)
}

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> FileSessionStore {
        FileSessionStore { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<AuthSession> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                debug!("unable to read {}: {err}", self.path.display());
                None
            }
        }
    }

    fn set(&self, session: &AuthSession) -> io::Result<()> {
        fs::write(&self.path, encode(session)?)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    raw: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> MemorySessionStore {
        MemorySessionStore::default()
    }

    /// Seeds the store with an already serialized record, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> MemorySessionStore {
        MemorySessionStore {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<AuthSession> {
        let raw = self.raw.lock().unwrap_or_else(PoisonError::into_inner);
        raw.as_deref().and_then(decode)
    }

    fn set(&self, session: &AuthSession) -> io::Result<()> {
        let encoded = encode(session)?;
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = Some(encoded);
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoguard::Role;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("ecoguard-session-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_roundtrip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(), None);

        let session = AuthSession::new("abc", Role::Admin);
        store.set(&session).unwrap();
        assert_eq!(store.get(), Some(session));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemorySessionStore::new();
        store.set(&AuthSession::new("first", Role::Admin)).unwrap();
        store.set(&AuthSession::new("second", Role::User)).unwrap();

        assert_eq!(store.get(), Some(AuthSession::new("second", Role::User)));
    }

    #[test]
    fn test_corrupt_record_reads_as_none() {
        assert_eq!(MemorySessionStore::with_raw("{not json").get(), None);
        assert_eq!(MemorySessionStore::with_raw("null").get(), None);
        assert_eq!(MemorySessionStore::with_raw(r#"{"role":"USER"}"#).get(), None);
        assert_eq!(
            MemorySessionStore::with_raw(r#"{"token":"","role":"USER"}"#).get(),
            None
        );
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let store = MemorySessionStore::new();
        let err = store.set(&AuthSession::new("", Role::User)).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_roundtrip() {
        let path = temp_path();
        let store = FileSessionStore::new(&path);
        assert_eq!(store.get(), None);

        let session = AuthSession::new("t0k3n", Role::User);
        store.set(&session).unwrap();
        assert_eq!(FileSessionStore::new(&path).get(), Some(session));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
        assert!(!path.exists());

        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_none() {
        let path = temp_path();
        fs::write(&path, "\u{0}garbage").unwrap();

        assert_eq!(FileSessionStore::new(&path).get(), None);

        fs::remove_file(&path).unwrap();
    }
}
