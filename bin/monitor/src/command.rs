use std::str::FromStr;

use ecoguard::{AlertId, DeviceCommand, ThresholdId, ThresholdPatch, Timestamp};

use crate::{Error, Result};

const DEFAULT_ALERT_LIMIT: usize = 10;

/// Who may run a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    SignedIn,
    Admin,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Latest,
    Readings,
    Range { start: Timestamp, end: Timestamp },
    Thresholds,
    SetThreshold { id: ThresholdId, patch: ThresholdPatch },
    Audit,
    Alerts { limit: usize },
    Acknowledge { ids: Vec<AlertId> },
    Review { limit: usize },
    SendCommand(DeviceCommand),
    Commands { device_key: String },
    Status,
    PushToken { token: String },
    Health,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Command> {
        let (name, rest) = args
            .split_first()
            .ok_or_else(|| usage("missing command"))?;
        let rest = rest.iter().map(String::as_str).collect::<Vec<_>>();

        let command = match (name.as_str(), rest.as_slice()) {
            ("login", [username, password]) => Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            },
            ("logout", []) => Command::Logout,
            ("latest", []) => Command::Latest,
            ("readings", []) => Command::Readings,
            ("range", [start, end]) => Command::Range {
                start: start.parse()?,
                end: end.parse()?,
            },
            ("thresholds", []) => Command::Thresholds,
            ("set-threshold", [id, min, max]) => {
                let patch = ThresholdPatch {
                    min_value: bound(min)?,
                    max_value: bound(max)?,
                };
                if patch.is_empty() {
                    return Err(usage("set-threshold needs a min or a max"));
                }

                Command::SetThreshold {
                    id: number(id, "threshold id")?,
                    patch,
                }
            }
            ("audit", []) => Command::Audit,
            ("alerts", []) => Command::Alerts {
                limit: DEFAULT_ALERT_LIMIT,
            },
            ("alerts", [limit]) => Command::Alerts {
                limit: number(limit, "limit")?,
            },
            ("ack", ids) if !ids.is_empty() => Command::Acknowledge {
                ids: ids
                    .iter()
                    .map(|id| number(id, "alert id"))
                    .collect::<Result<_>>()?,
            },
            ("review", []) => Command::Review {
                limit: DEFAULT_ALERT_LIMIT,
            },
            ("review", [limit]) => Command::Review {
                limit: number(limit, "limit")?,
            },
            ("command", [device_key, command_type]) => {
                Command::SendCommand(DeviceCommand::new(*device_key, *command_type, None))
            }
            ("command", [device_key, command_type, parameters]) => Command::SendCommand(
                DeviceCommand::new(*device_key, *command_type, Some(parameters.to_string())),
            ),
            ("commands", [device_key]) => Command::Commands {
                device_key: device_key.to_string(),
            },
            ("status", []) => Command::Status,
            ("push-token", [token]) => Command::PushToken {
                token: token.to_string(),
            },
            ("health", []) => Command::Health,
            (name, _) => return Err(usage(&format!("unknown command or arguments: {name}"))),
        };

        Ok(command)
    }

    pub fn access(&self) -> Access {
        match self {
            Command::Login { .. } | Command::Logout | Command::Health => Access::Public,
            Command::SetThreshold { .. }
            | Command::Audit
            | Command::SendCommand(_)
            | Command::Commands { .. }
            | Command::Status => Access::Admin,
            _ => Access::SignedIn,
        }
    }
}

fn usage(message: &str) -> Error {
    Error::Usage(message.to_string())
}

fn number<T: FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| usage(&format!("invalid {what}: {value}")))
}

// "-" leaves the bound unchanged
fn bound(value: &str) -> Result<Option<f64>> {
    match value {
        "-" => Ok(None),
        value => number(value, "bound").map(Some),
    }
}
