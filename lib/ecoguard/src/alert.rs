use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{MetricType, Timestamp};

pub type AlertId = u64;

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertType {
    Threshold,
    Intruder,
    #[serde(other)]
    Unknown,
}

/// An alert only moves from unacknowledged to acknowledged, and only through
/// the backend.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    #[serde(default)]
    pub alert_type: Option<AlertType>,
    #[serde(default)]
    pub metric_type: Option<MetricType>,
    #[serde(default)]
    pub value: Option<f64>,
    pub timestamp: Timestamp,
    #[serde(default, deserialize_with = "crate::null_as_false")]
    pub acknowledged: bool,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ", self.id)?;

        match (self.metric_type, self.value) {
            (Some(metric), Some(value)) => write!(f, "{metric}: {value}{}", metric.unit())?,
            (Some(metric), None) => write!(f, "{metric}")?,
            (None, Some(value)) => write!(f, "{value}")?,
            (None, None) => write!(f, "-")?,
        }

        if self.acknowledged {
            write!(f, " (acknowledged)")?;
        }

        write!(f, "\nTime: {}", self.timestamp)
    }
}
