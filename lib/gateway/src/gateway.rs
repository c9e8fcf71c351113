use std::sync::Arc;

use ecoguard::AuthSession;
use log::{debug, trace, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{
    AuthExpiredHandler, Error, HttpRequest, Method, Result, SessionStore, Transport,
};

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Vec<u8>>,
    pub headers: Vec<(&'static str, String)>,
}

impl RequestOptions {
    pub fn get() -> RequestOptions {
        RequestOptions::default()
    }

    pub fn method(method: Method) -> RequestOptions {
        RequestOptions {
            method,
            ..Default::default()
        }
    }

    pub fn json<T: Serialize>(method: Method, body: &T) -> Result<RequestOptions> {
        Ok(RequestOptions {
            method,
            body: Some(serde_json::to_vec(body)?),
            ..Default::default()
        })
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> RequestOptions {
        self.headers.push((name, value.into()));
        self
    }
}

/// Outcome of a request that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Json(Value),
    /// 204 or a success without a body.
    Empty,
    /// 404; absence is not an error.
    NotFound,
    /// 401; the auth-expired handler has already run.
    AuthExpired,
}

/// Maps a status and body onto a reply. Has no side effects.
pub fn classify(status: u16, body: &[u8]) -> Result<Reply> {
    match status {
        401 => Ok(Reply::AuthExpired),
        403 => Err(Error::Forbidden),
        404 => Ok(Reply::NotFound),
        204 => Ok(Reply::Empty),
        200..=299 if body.iter().all(u8::is_ascii_whitespace) => Ok(Reply::Empty),
        200..=299 => Ok(Reply::Json(serde_json::from_slice(body)?)),
        _ => Err(Error::Http {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}

#[derive(Clone)]
pub struct RequestGateway {
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
    auth_expired: Arc<dyn AuthExpiredHandler>,
}

impl RequestGateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn SessionStore>,
        auth_expired: Arc<dyn AuthExpiredHandler>,
    ) -> RequestGateway {
        RequestGateway {
            transport,
            store,
            auth_expired,
        }
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.store.get()
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub async fn send(&self, path: &str, options: RequestOptions) -> Result<Reply> {
        let request = self.prepare(path, options);
        debug!("{:?} {}", request.method, request.path);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(Error::Network)?;

        trace!("{path} responded with {}", response.status);

        let reply = classify(response.status, &response.body)?;

        if reply == Reply::AuthExpired {
            warn!("{path} rejected the session, signing out");
            self.auth_expired.auth_expired();
        }

        Ok(reply)
    }

    /// Like `send`, but decodes a JSON body into `T`. Every body-less reply,
    /// including an expired session, comes back as `None`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<T>> {
        match self.send(path, options).await? {
            Reply::Json(value) => Ok(Some(serde_json::from_value(value)?)),
            Reply::Empty | Reply::NotFound | Reply::AuthExpired => Ok(None),
        }
    }

    fn prepare(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![("Content-Type", JSON_CONTENT_TYPE.to_string())];

        for (name, value) in options.headers {
            headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
            headers.push((name, value));
        }

        if let Some(session) = self.store.get() {
            headers.retain(|(key, _)| !key.eq_ignore_ascii_case("Authorization"));
            headers.push(("Authorization", format!("Bearer {}", session.token)));
        }

        HttpRequest {
            method: options.method,
            path: path.to_string(),
            headers,
            body: options.body,
        }
    }
}
