//! Cloud Monitoring backend for metrics-list
//!
//! Lists metric descriptors from the Cloud Monitoring v3 REST API and
//! exposes them through the `MetricCatalog` trait.
//!
//! # Architecture
//!
//! - `catalog` - `MetricCatalog` implementation
//! - `client` - HTTP client and API methods
//! - `types` - API response types
//! - `mapper` - Wire to domain mapping
//! - `config` - Connection settings and HTTP client construction
//!
//! # Example Usage
//!
//! ```no_run
//! use metrics_list_api::{list_descriptors, ListDescriptorsRequest};
//! use metrics_list_monitoring::{MonitoringCatalog, MonitoringSettings};
//!
//! # fn main() -> Result<(), metrics_list_api::CatalogError> {
//! let catalog = MonitoringCatalog::new(&MonitoringSettings::default())?;
//! let request = ListDescriptorsRequest::for_prefix("my-project", "custom.googleapis.com/");
//! let descriptors = list_descriptors(&catalog, &request);
//! # Ok(())
//! # }
//! ```

mod catalog;
mod client;
mod config;
mod mapper;
mod types;

pub use catalog::MonitoringCatalog;
pub use config::MonitoringSettings;
