pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{
    list_descriptors,
    MetricCatalog,
};
pub use error::{
    CatalogError,
    CatalogResult,
};
pub use types::{
    prefix_filter,
    DescriptorPage,
    LabelDescriptor,
    ListDescriptorsRequest,
    MetricDescriptor,
    MetricKind,
    ValueType,
};
