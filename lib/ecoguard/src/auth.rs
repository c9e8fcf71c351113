use serde::{Deserialize, Serialize};

use crate::{AuthSession, Role};

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub username: Option<String>,
    pub role: Role,
}

impl From<LoginResponse> for AuthSession {
    fn from(response: LoginResponse) -> Self {
        AuthSession::new(response.token, response.role)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTokenRequest {
    pub device_token: String,
}
