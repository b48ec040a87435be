pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use config::{EndpointConfig, TrackerConfig};
pub use error::{FetchError, Stage};
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient, TransportError};
pub use pipeline::PassPipeline;
pub use resolver::{GeoResolver, IpResolver, PassTimeResolver};
