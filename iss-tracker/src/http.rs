//! HTTP collaborator used by the resolvers
//!
//! Resolvers only need "GET this URL, give me status and body". The trait keeps
//! them independent of reqwest so tests can feed canned responses.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::TrackerConfig;

/// Failure below HTTP: DNS, connect, TLS, timeout, broken body stream.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }

    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err)
    }
}

/// Status code and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a single GET. Any status code counts as a response, only
    /// transport level failures are errors.
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// reqwest backed client, one attempt per call
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &TrackerConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            Duration::from_secs(config.request_timeout_seconds),
            &config.user_agent,
        )
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    enum Reply {
        Response(HttpResponse),
        Transport(String),
    }

    /// Answers by URL prefix and records every requested URL.
    #[derive(Debug, Default)]
    pub struct StubHttpClient {
        routes: Vec<(String, Reply)>,
        calls: Mutex<Vec<String>>,
    }

    impl StubHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, prefix: &str, status: u16, body: &str) -> Self {
            self.routes.push((
                prefix.to_string(),
                Reply::Response(HttpResponse::new(status, body)),
            ));
            self
        }

        pub fn fail(mut self, prefix: &str, message: &str) -> Self {
            self.routes
                .push((prefix.to_string(), Reply::Transport(message.to_string())));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn calls_to(&self, prefix: &str) -> usize {
            self.calls()
                .iter()
                .filter(|url| url.starts_with(prefix))
                .count()
        }
    }

    #[async_trait]
    impl HttpClient for StubHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
            self.calls.lock().unwrap().push(url.to_string());

            let reply = self
                .routes
                .iter()
                .find(|(prefix, _)| url.starts_with(prefix.as_str()))
                .map(|(_, reply)| reply.clone());

            match reply {
                Some(Reply::Response(response)) => Ok(response),
                Some(Reply::Transport(message)) => Err(TransportError::new(message)),
                None => Ok(HttpResponse::new(404, "no stub route")),
            }
        }
    }
}
