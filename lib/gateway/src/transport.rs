use async_trait::async_trait;
use chipp_http::{HttpClient, HttpMethod, NoInterceptor};
use log::trace;

use crate::{ErasedError, Error};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Carries a prepared request to the backend. Any failure to get a response
/// at all is a transport error; HTTP statuses are never errors here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ErasedError>;
}

pub struct ChippTransport {
    base_url: String,
    client: HttpClient<NoInterceptor>,
}

impl ChippTransport {
    pub fn new(base_url: impl Into<String>) -> Result<ChippTransport, Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = HttpClient::new(base_url.as_str())
            .map_err(|err| Error::Network(err.to_string().into()))?;

        Ok(ChippTransport { base_url, client })
    }
}

#[async_trait]
impl Transport for ChippTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ErasedError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut outgoing = self.client.new_request_with_url(url)?;

        outgoing.set_method(match request.method {
            Method::Get => HttpMethod::Get,
            Method::Post => HttpMethod::Post,
            Method::Put => HttpMethod::Put,
            Method::Delete => HttpMethod::Delete,
        });

        for (name, value) in request.headers {
            outgoing.add_header(name, value);
        }

        outgoing.body = request.body;

        let response = self
            .client
            .perform_request(outgoing, |_, response| {
                trace!("response: {}", String::from_utf8_lossy(&response.body));

                Ok(HttpResponse {
                    status: u16::try_from(response.status_code).unwrap_or(u16::MAX),
                    body: response.body,
                })
            })
            .await?;

        Ok(response)
    }
}
