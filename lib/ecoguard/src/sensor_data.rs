use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{MetricType, Timestamp};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub timestamp: Timestamp,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(rename = "co2Level", alias = "co2")]
    pub co2: Option<u32>,
    pub light_level: Option<u32>,
}

impl SensorReading {
    pub fn value(&self, metric: MetricType) -> Option<f64> {
        match metric {
            MetricType::Temp => self.temperature,
            MetricType::Humidity => self.humidity,
            MetricType::Co2 => self.co2.map(f64::from),
            MetricType::Light => self.light_level.map(f64::from),
            MetricType::Unknown => None,
        }
    }
}

struct Measure<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Measure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "N/A"),
        }
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Temperature: {}°C", Measure(self.temperature))?;
        writeln!(f, "Humidity: {}%", Measure(self.humidity))?;
        writeln!(f, "CO₂: {} ppm", Measure(self.co2))?;
        writeln!(f, "Light: {} lux", Measure(self.light_level))?;
        write!(f, "Time: {}", self.timestamp)
    }
}
