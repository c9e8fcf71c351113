use serde::{Deserialize, Serialize};

use crate::Role;

/// The locally persisted proof of sign-in.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub role: Role,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, role: Role) -> AuthSession {
        AuthSession {
            token: token.into(),
            role,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.token.is_empty()
    }
}
