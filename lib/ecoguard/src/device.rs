use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Timestamp;

pub const SET_LED_COLOR: &str = "SET_LED_COLOR";
pub const DISPLAY_MESSAGE: &str = "DISPLAY_MESSAGE";
pub const BLE_BROADCAST: &str = "BLE_BROADCAST";
pub const REFRESH_CONFIG: &str = "REFRESH_CONFIG";

/// A command queued for a device. Created by the client, never mutated
/// locally.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCommand {
    pub device_key: String,
    pub command_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
}

impl DeviceCommand {
    pub fn new(
        device_key: impl Into<String>,
        command_type: impl Into<String>,
        parameters: Option<String>,
    ) -> DeviceCommand {
        DeviceCommand {
            device_key: device_key.into(),
            command_type: command_type.into(),
            parameters,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandReceipt {
    pub command_id: u64,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueuedCommand {
    pub id: u64,
    pub device_key: String,
    pub command_type: String,
    pub parameters: Option<String>,
    #[serde(default, deserialize_with = "crate::null_as_false")]
    pub executed: bool,
    pub created_at: Option<Timestamp>,
    pub executed_at: Option<Timestamp>,
}

impl fmt::Display for QueuedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.command_type)?;

        if let Some(parameters) = &self.parameters {
            write!(f, " {parameters}")?;
        }

        match (self.executed, self.executed_at, self.created_at) {
            (true, Some(at), _) => write!(f, " (executed {at})"),
            (true, None, _) => write!(f, " (executed)"),
            (false, _, Some(at)) => write!(f, " (pending since {at})"),
            (false, _, None) => write!(f, " (pending)"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub last_reading_time: Option<Timestamp>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub co2: Option<u32>,
    pub light_level: Option<u32>,
    pub last_alert_time: Option<Timestamp>,
    pub last_alert_type: Option<String>,
    pub last_admin_message: Option<String>,
    #[serde(default)]
    pub online: bool,
    pub seconds_since_last_seen: Option<u64>,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.online {
            write!(f, "online")?;
        } else {
            write!(f, "offline")?;
        }

        if let Some(seconds) = self.seconds_since_last_seen {
            write!(f, ", last seen {seconds}s ago")?;
        }

        if let (Some(kind), Some(at)) = (&self.last_alert_type, self.last_alert_time) {
            write!(f, "\nLast alert: {kind} at {at}")?;
        }

        if let Some(message) = &self.last_admin_message {
            write!(f, "\nLast message: {message}")?;
        }

        Ok(())
    }
}
