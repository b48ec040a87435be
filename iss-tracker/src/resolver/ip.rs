use serde::Deserialize;
use std::sync::Arc;

use iss_common::IpAddress;

use super::fetch_json;
use crate::config::EndpointConfig;
use crate::error::{FetchError, Stage};
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct IpBody {
    ip: String,
}

/// Looks up the caller's public IP
pub struct IpResolver {
    client: Arc<dyn HttpClient>,
    url: String,
}

impl IpResolver {
    pub fn new(client: Arc<dyn HttpClient>, endpoints: &EndpointConfig) -> Self {
        Self {
            client,
            url: endpoints.ip_url(),
        }
    }

    pub async fn resolve_my_ip(&self) -> Result<IpAddress, FetchError> {
        let body: IpBody = fetch_json(self.client.as_ref(), &self.url, Stage::Ip).await?;
        Ok(IpAddress::new(body.ip))
    }
}
