use serde::Deserialize;
use std::sync::Arc;

use iss_common::{Coordinates, IpAddress};

use super::fetch_json;
use crate::config::EndpointConfig;
use crate::error::{FetchError, Stage};
use crate::http::HttpClient;

// ipbase.com nests the position under data.location
#[derive(Debug, Deserialize)]
struct GeoBody {
    data: GeoData,
}

#[derive(Debug, Deserialize)]
struct GeoData {
    location: GeoLocation,
}

#[derive(Debug, Deserialize)]
struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

/// Maps an IP address to the coordinates it is registered at
pub struct GeoResolver {
    client: Arc<dyn HttpClient>,
    endpoints: EndpointConfig,
}

impl GeoResolver {
    pub fn new(client: Arc<dyn HttpClient>, endpoints: &EndpointConfig) -> Self {
        Self {
            client,
            endpoints: endpoints.clone(),
        }
    }

    pub async fn resolve_coordinates(&self, ip: &IpAddress) -> Result<Coordinates, FetchError> {
        let url = self.endpoints.geo_url(ip);
        let body: GeoBody = fetch_json(self.client.as_ref(), &url, Stage::Coordinates).await?;
        let location = body.data.location;
        Ok(Coordinates::new(location.latitude, location.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubHttpClient;

    const GEO_URL: &str = "https://api.ipbase.com/v2/info";

    fn resolver(stub: StubHttpClient) -> (Arc<StubHttpClient>, GeoResolver) {
        let stub = Arc::new(stub);
        let endpoints = EndpointConfig {
            geo_api_key: "test-key".to_string(),
            ..EndpointConfig::default()
        };
        let resolver = GeoResolver::new(stub.clone(), &endpoints);
        (stub, resolver)
    }

    #[tokio::test]
    async fn test_resolve_coordinates() {
        let (stub, resolver) = resolver(StubHttpClient::new().respond(
            GEO_URL,
            200,
            concat!(
                r#"{"data":{"ip":"162.245.144.188","location":"#,
                r#"{"latitude":12.34,"longitude":56.78,"city":{"name":"Vancouver"}}}}"#
            ),
        ));

        let coords = resolver
            .resolve_coordinates(&IpAddress::from("162.245.144.188"))
            .await
            .unwrap();
        assert_eq!(coords, Coordinates::new(12.34, 56.78));

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("ip=162.245.144.188"));
        assert!(calls[0].contains("apikey=test-key"));
    }

    #[tokio::test]
    async fn test_non_200_status() {
        let (_, resolver) = resolver(StubHttpClient::new().respond(
            GEO_URL,
            401,
            r#"{"message":"Invalid API key"}"#,
        ));

        match resolver.resolve_coordinates(&IpAddress::from("1.1.1.1")).await {
            Err(FetchError::UpstreamStatus { stage, status, body }) => {
                assert_eq!(stage, Stage::Coordinates);
                assert_eq!(status, 401);
                assert_eq!(body, r#"{"message":"Invalid API key"}"#);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let (_, resolver) = resolver(StubHttpClient::new().fail(GEO_URL, "timed out"));

        let err = resolver
            .resolve_coordinates(&IpAddress::from("1.1.1.1"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.to_string(), "timed out");
    }

    #[tokio::test]
    async fn test_missing_location() {
        let (_, resolver) = resolver(StubHttpClient::new().respond(GEO_URL, 200, r#"{"data":{}}"#));

        let err = resolver
            .resolve_coordinates(&IpAddress::from("1.1.1.1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::MalformedResponse { stage: Stage::Coordinates, .. }
        ));
    }
}
