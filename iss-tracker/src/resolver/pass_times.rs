use serde::Deserialize;
use std::sync::Arc;

use iss_common::{Coordinates, PassWindowList};

use super::fetch_json;
use crate::config::EndpointConfig;
use crate::error::{FetchError, Stage};
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct PassBody {
    response: PassWindowList,
}

/// Fetches predicted ISS fly-overs for a position
pub struct PassTimeResolver {
    client: Arc<dyn HttpClient>,
    endpoints: EndpointConfig,
}

impl PassTimeResolver {
    pub fn new(client: Arc<dyn HttpClient>, endpoints: &EndpointConfig) -> Self {
        Self {
            client,
            endpoints: endpoints.clone(),
        }
    }

    /// Returns the upstream `response` list as is: no sorting, no limit.
    pub async fn resolve_pass_times(
        &self,
        coords: Coordinates,
    ) -> Result<PassWindowList, FetchError> {
        let url = self.endpoints.pass_url(coords);
        let body: PassBody = fetch_json(self.client.as_ref(), &url, Stage::PassTimes).await?;
        Ok(body.response)
    }
}
