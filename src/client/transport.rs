use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::error::ClientError;

/// Media type of form-encoded request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sends requests to the orchestration backend.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs a form-encoded `body` to `path`, returning the response body.
    ///
    /// Non-success statuses are errors.
    async fn post_form(&self, path: &str, body: String) -> Result<String, ClientError>;
}

/// [`Transport`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport rooted at `base_url`.
    ///
    /// Endpoint paths are resolved relative to it, so it should end in `/`.
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, path: &str, body: String) -> Result<String, ClientError> {
        let url = self.endpoint(path)?;
        debug!(%url, bytes = body.len(), "POST");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_joins_onto_root() {
        let t = transport("http://localhost:8089/");
        assert_eq!(
            t.endpoint("swarm").unwrap().as_str(),
            "http://localhost:8089/swarm"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let t = transport("http://example.com/locust/");
        assert_eq!(
            t.endpoint("swarm").unwrap().as_str(),
            "http://example.com/locust/swarm"
        );
    }

    #[test]
    fn base_url_accessor() {
        let t = transport("http://localhost:8089/");
        assert_eq!(t.base_url().as_str(), "http://localhost:8089/");
    }
}
