use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{MetricType, Timestamp};

pub type ThresholdId = u64;

/// Acceptable range for one metric. An absent bound means no limit on that
/// side.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub id: ThresholdId,
    pub metric_type: MetricType,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl Threshold {
    pub fn admits(&self, value: f64) -> bool {
        self.min_value.map_or(true, |min| value >= min)
            && self.max_value.map_or(true, |max| value <= max)
    }
}

struct Bound(Option<f64>);

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "N/A"),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:\n  Min: {}\n  Max: {}",
            self.metric_type,
            Bound(self.min_value),
            Bound(self.max_value)
        )
    }
}

/// Body of a threshold update; absent bounds are left untouched by the
/// backend.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl ThresholdPatch {
    pub fn is_empty(&self) -> bool {
        self.min_value.is_none() && self.max_value.is_none()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdAudit {
    pub id: u64,
    pub threshold_id: Option<ThresholdId>,
    pub metric_type: MetricType,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub updated_by: Option<String>,
    pub updated_at: Timestamp,
}

impl fmt::Display for ThresholdAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} min={} max={} by {}",
            self.updated_at,
            self.metric_type,
            Bound(self.min_value),
            Bound(self.max_value),
            self.updated_by.as_deref().unwrap_or("unknown")
        )
    }
}
