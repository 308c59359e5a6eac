//! Generates aggregation configurations from a metric catalog.
//!
//! The [`walker`] lists descriptors under a type prefix, the [`aligner`]
//! table decides which derived measurements each one gets, and [`output`]
//! assembles and serializes the resulting document.

pub mod aligner;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod walker;

pub use aligner::{
    derived_measurements,
    Aligner,
    AlignerRule,
    DerivedMeasurement,
    ALIGNER_RULES,
};
pub use error::{
    GenerateError,
    GenerateResult,
};
pub use output::{
    MetricConfig,
    OutputDocument,
};
pub use walker::{
    base_measurement_name,
    generate,
    CatalogWalker,
    WalkerSettings,
};
