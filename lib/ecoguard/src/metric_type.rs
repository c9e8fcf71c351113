use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricType {
    Temp,
    Humidity,
    Co2,
    Light,
    #[serde(other)]
    Unknown,
}

impl MetricType {
    pub const fn unit(&self) -> &'static str {
        match self {
            MetricType::Temp => "°C",
            MetricType::Humidity => "%",
            MetricType::Co2 => "ppm",
            MetricType::Light => "lux",
            MetricType::Unknown => "",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.serialize(f)
    }
}
