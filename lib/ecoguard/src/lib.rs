mod alert;
pub use alert::{Alert, AlertId, AlertType};

mod auth;
pub use auth::{Credentials, DeviceTokenRequest, LoginResponse};

pub mod device;
pub use device::{CommandReceipt, DeviceCommand, DeviceStatus, QueuedCommand};

mod health;
pub use health::{DatabaseHealth, Health};

mod metric_type;
pub use metric_type::MetricType;

mod role;
pub use role::Role;

mod sensor_data;
pub use sensor_data::SensorReading;

mod session;
pub use session::AuthSession;

mod threshold;
pub use threshold::{Threshold, ThresholdAudit, ThresholdId, ThresholdPatch};

/// Backend timestamps are local date-times without an offset.
pub type Timestamp = chrono::NaiveDateTime;

pub(crate) fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}
