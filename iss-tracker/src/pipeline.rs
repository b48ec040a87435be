//! IP -> coordinates -> pass times, strictly in sequence.

use std::sync::Arc;

use iss_common::PassWindowList;

use crate::config::EndpointConfig;
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::resolver::{GeoResolver, IpResolver, PassTimeResolver};

/// Chains the three resolvers, stopping at the first failure.
///
/// Every stage needs the previous stage's output, so calls never overlap and
/// each resolver runs at most once per invocation. Errors are returned as the
/// failing resolver produced them.
pub struct PassPipeline {
    ip: IpResolver,
    geo: GeoResolver,
    passes: PassTimeResolver,
}

impl PassPipeline {
    pub fn new(client: Arc<dyn HttpClient>, endpoints: &EndpointConfig) -> Self {
        Self {
            ip: IpResolver::new(client.clone(), endpoints),
            geo: GeoResolver::new(client.clone(), endpoints),
            passes: PassTimeResolver::new(client, endpoints),
        }
    }

    pub async fn next_passes_for_current_location(&self) -> Result<PassWindowList, FetchError> {
        let ip = self.ip.resolve_my_ip().await?;
        tracing::info!("Resolved public IP: {}", ip);

        let coords = self.geo.resolve_coordinates(&ip).await?;
        tracing::info!(
            "Resolved coordinates: lat {}, lon {}",
            coords.latitude,
            coords.longitude
        );

        let passes = self.passes.resolve_pass_times(coords).await?;
        tracing::info!("Received {} upcoming passes", passes.len());

        Ok(passes)
    }
}
