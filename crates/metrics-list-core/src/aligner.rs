//! Aligner selection for metric descriptors.
//!
//! Which aligners a metric can be aggregated with depends only on its kind
//! and value type. The combinations this tool generates are declared once in
//! [`ALIGNER_RULES`]; the table is walked in order so output is stable.

use metrics_list_api::{
    MetricKind,
    ValueType,
};
use serde::{
    Serialize,
    Serializer,
};

/// Cloud Monitoring `Aggregation.Aligner` values used by this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Aligner {
    Delta = 1,
    Rate = 2,
    Interpolate = 3,
    Min = 10,
    Max = 11,
    Mean = 12,
    Count = 13,
    Sum = 14,
    Stddev = 15,
    CountTrue = 16,
    FractionTrue = 17,
    Percentile99 = 18,
    Percentile95 = 19,
    Percentile50 = 20,
    Percentile05 = 21,
    PercentChange = 23,
    CountFalse = 24,
}

impl Aligner {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delta => "ALIGN_DELTA",
            Self::Rate => "ALIGN_RATE",
            Self::Interpolate => "ALIGN_INTERPOLATE",
            Self::Min => "ALIGN_MIN",
            Self::Max => "ALIGN_MAX",
            Self::Mean => "ALIGN_MEAN",
            Self::Count => "ALIGN_COUNT",
            Self::Sum => "ALIGN_SUM",
            Self::Stddev => "ALIGN_STDDEV",
            Self::CountTrue => "ALIGN_COUNT_TRUE",
            Self::FractionTrue => "ALIGN_FRACTION_TRUE",
            Self::Percentile99 => "ALIGN_PERCENTILE_99",
            Self::Percentile95 => "ALIGN_PERCENTILE_95",
            Self::Percentile50 => "ALIGN_PERCENTILE_50",
            Self::Percentile05 => "ALIGN_PERCENTILE_05",
            Self::PercentChange => "ALIGN_PERCENT_CHANGE",
            Self::CountFalse => "ALIGN_COUNT_FALSE",
        }
    }

    /// Whether the catalog accepts this aligner for a metric of the given
    /// kind and value type.
    pub fn is_valid_for(&self, kind: MetricKind, value_type: ValueType) -> bool {
        use MetricKind::{
            Cumulative,
            Delta,
            Gauge,
        };

        let gauge_or_delta = matches!(kind, Gauge | Delta);
        let numeric = value_type.is_numeric();

        match self {
            Self::Delta => {
                matches!(kind, Cumulative | Delta)
                    && (numeric || value_type == ValueType::Distribution)
            }
            Self::Rate => matches!(kind, Cumulative | Delta) && numeric,
            Self::Interpolate => kind == Gauge && numeric,
            Self::Min | Self::Max | Self::Mean | Self::Stddev | Self::PercentChange => {
                gauge_or_delta && numeric
            }
            Self::Count => gauge_or_delta && (numeric || value_type == ValueType::Bool),
            Self::Sum => gauge_or_delta && (numeric || value_type == ValueType::Distribution),
            Self::CountTrue | Self::CountFalse | Self::FractionTrue => {
                kind == Gauge && value_type == ValueType::Bool
            }
            Self::Percentile99 | Self::Percentile95 | Self::Percentile50 | Self::Percentile05 => {
                gauge_or_delta && value_type == ValueType::Distribution
            }
        }
    }
}

impl Serialize for Aligner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// `Aggregation.Reducer` REDUCE_NONE: series are aligned but never combined.
pub const REDUCE_NONE: i32 = 0;

/// One derived series: the aligner to apply and the name to publish it under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedMeasurement {
    #[serde(rename = "alignment")]
    pub aligner: Aligner,
    pub reducer: i32,
    pub measurement: String,
}

#[derive(Debug)]
pub struct AlignerRule {
    pub kinds: &'static [MetricKind],
    pub value_types: &'static [ValueType],
    /// Aligners with the suffix appended to the base measurement name.
    pub measurements: &'static [(Aligner, &'static str)],
}

impl AlignerRule {
    pub fn matches(&self, kind: MetricKind, value_type: ValueType) -> bool {
        self.kinds.contains(&kind) && self.value_types.contains(&value_type)
    }
}

const GAUGE_OR_DELTA: &[MetricKind] = &[MetricKind::Gauge, MetricKind::Delta];
const NUMERIC: &[ValueType] = &[ValueType::Int64, ValueType::Double];

// ALIGN_PERCENT_CHANGE is accepted for gauge and delta numerics but is
// intentionally left out of the statistics rule.
pub static ALIGNER_RULES: &[AlignerRule] = &[
    AlignerRule {
        kinds: GAUGE_OR_DELTA,
        value_types: NUMERIC,
        measurements: &[
            (Aligner::Min, "_min"),
            (Aligner::Max, "_max"),
            (Aligner::Mean, "_mean"),
            (Aligner::Count, "_count"),
            (Aligner::Sum, "_sum"),
            (Aligner::Stddev, "_stddev"),
        ],
    },
    AlignerRule {
        kinds: GAUGE_OR_DELTA,
        value_types: &[ValueType::Distribution],
        measurements: &[
            (Aligner::Percentile99, "_p99"),
            (Aligner::Percentile95, "_p95"),
            (Aligner::Percentile50, "_p50"),
            (Aligner::Percentile05, "_p05"),
        ],
    },
    AlignerRule {
        kinds: &[MetricKind::Gauge],
        value_types: NUMERIC,
        measurements: &[(Aligner::Interpolate, "")],
    },
    AlignerRule {
        kinds: &[MetricKind::Gauge],
        value_types: &[ValueType::Bool],
        measurements: &[
            (Aligner::CountTrue, "_true_count"),
            (Aligner::CountFalse, "_false_count"),
            (Aligner::FractionTrue, "_percent_true"),
        ],
    },
    AlignerRule {
        kinds: &[MetricKind::Delta],
        value_types: NUMERIC,
        measurements: &[(Aligner::Delta, ""), (Aligner::Rate, "_rate")],
    },
];

/// Derived measurements for a metric, in rule order.
///
/// Combinations without a rule (cumulative, string, money, unspecified)
/// yield an empty list. Names are `base_name` plus the rule suffix; an empty
/// suffix publishes the raw alignment under `base_name` itself.
pub fn derived_measurements(
    kind: MetricKind, value_type: ValueType, base_name: &str,
) -> Vec<DerivedMeasurement> {
    ALIGNER_RULES
        .iter()
        .filter(|rule| rule.matches(kind, value_type))
        .flat_map(|rule| rule.measurements.iter())
        .map(|(aligner, suffix)| DerivedMeasurement {
            aligner: *aligner,
            reducer: REDUCE_NONE,
            measurement: format!("{base_name}{suffix}"),
        })
        .collect()
}
