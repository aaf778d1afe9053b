use reqwest::{header, Client, Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorEnvelope};

/// Thin JSON-over-HTTP client shared by every domain's request wrappers.
///
/// Endpoints are addressed by path segments, each percent-encoded on its own,
/// so ids taken from responses can never add segments or a query.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let invalid = || ApiError::InvalidBaseUrl(config.base_url.clone());
        let base_url =
            Url::parse(config.base_url.trim_end_matches('/')).map_err(|_| invalid())?;
        if base_url.cannot_be_a_base() {
            return Err(invalid());
        }
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    fn request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder, ApiError> {
        let builder = self
            .http
            .request(method, self.url(path)?)
            .header(header::ACCEPT, "application/json");
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    pub(crate) async fn get_json<Q, R>(&self, path: &[&str], query: &Q) -> Result<R, ApiError>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute(self.request(Method::GET, path)?.query(query)).await
    }

    pub(crate) async fn send_json<B, R>(
        &self,
        method: Method,
        path: &[&str],
        body: &B,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute(self.request(method, path)?.json(body)).await
    }

    async fn execute<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await?;
        debug!(%status, %url, bytes = body.len(), "response");

        if !status.is_success() {
            let envelope = ErrorEnvelope::from_body(&body);
            warn!(%status, %url, message = %envelope.message, "request rejected");
            return Err(ApiError::Server {
                status: status.as_u16(),
                envelope,
            });
        }

        serde_json::from_slice(&body).map_err(|source| {
            warn!(%status, %url, error = %source, "response schema mismatch");
            ApiError::Decode {
                status: status.as_u16(),
                source,
            }
        })
    }
}
