//! One resolver per upstream service. Each does a single GET and turns the
//! JSON body into a typed value.

pub mod geo;
pub mod ip;
pub mod pass_times;

pub use geo::GeoResolver;
pub use ip::IpResolver;
pub use pass_times::PassTimeResolver;

use serde::de::DeserializeOwned;

use crate::error::{FetchError, Stage};
use crate::http::HttpClient;

/// GET `url`, require status 200 and decode the body as `T`.
async fn fetch_json<T: DeserializeOwned>(
    client: &dyn HttpClient,
    url: &str,
    stage: Stage,
) -> Result<T, FetchError> {
    tracing::debug!("Fetching {} from {}", stage, url);

    let response = client.get(url).await?;

    if response.status != 200 {
        return Err(FetchError::UpstreamStatus {
            stage,
            status: response.status,
            body: response.body,
        });
    }

    serde_json::from_str(&response.body)
        .map_err(|source| FetchError::MalformedResponse { stage, source })
}
