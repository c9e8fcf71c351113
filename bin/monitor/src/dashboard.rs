use ecoguard::{Role, SensorReading, Threshold};
use gateway::{AlertWorkflow, Api, RouteState};
use log::{info, warn};

use crate::{Access, Command, Error, Result};

/// Runs commands against the backend the way the dashboard screens do.
pub struct Dashboard {
    api: Api,
    workflow: AlertWorkflow,
    routes: RouteState,
}

impl Dashboard {
    pub fn new(api: Api, routes: RouteState) -> Dashboard {
        Dashboard {
            workflow: AlertWorkflow::new(api.clone()),
            api,
            routes,
        }
    }

    fn guard(&self, access: Access) -> Result<()> {
        let store = self.api.gateway().store();

        match access {
            Access::Public => Ok(()),
            Access::SignedIn if self.routes.require_signed_in(store) => Ok(()),
            Access::SignedIn => Err(Error::NotSignedIn),
            Access::Admin if !self.routes.require_signed_in(store) => Err(Error::NotSignedIn),
            Access::Admin if self.routes.require_role(store, Role::Admin) => Ok(()),
            Access::Admin => Err(Error::AdminRequired),
        }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        self.guard(command.access())?;

        match command {
            Command::Login { username, password } => {
                let session = self.api.login(&username, &password).await?;
                println!("Signed in as {} ({})", username, session.role);
            }
            Command::Logout => {
                self.api.logout()?;
                println!("Signed out");
            }
            Command::Latest => {
                let reading = self.workflow.fetch_latest_reading().await?;
                let thresholds = self.workflow.fetch_thresholds().await?;

                println!("{reading}");
                for warning in breaches(&reading, &thresholds) {
                    println!("{warning}");
                }
            }
            Command::Readings => {
                print_all(&self.workflow.fetch_readings().await?, "No sensor data");
            }
            Command::Range { start, end } => {
                print_all(
                    &self.api.readings_between(start, end).await?,
                    "No sensor data in range",
                );
            }
            Command::Thresholds => {
                print_all(&self.workflow.fetch_thresholds().await?, "No thresholds");
            }
            Command::SetThreshold { id, patch } => {
                match self.api.update_threshold(id, &patch).await? {
                    Some(threshold) => println!("Updated\n{threshold}"),
                    None => println!("Threshold {id} not found"),
                }
            }
            Command::Audit => {
                print_all(&self.api.threshold_audits().await?, "No threshold changes");
            }
            Command::Alerts { limit } => {
                print_all(&self.workflow.fetch_recent(limit).await?, "No alerts");
            }
            Command::Acknowledge { ids } => {
                let count = self.workflow.acknowledge_all(&ids).await?;
                println!("Acknowledged {count} alerts");
            }
            Command::Review { limit } => {
                let alerts = self.workflow.fetch_recent(limit).await?;
                print_all(&alerts, "No alerts");

                let pending = alerts
                    .iter()
                    .filter(|alert| !alert.acknowledged)
                    .map(|alert| alert.id)
                    .collect::<Vec<_>>();

                if !pending.is_empty() {
                    let count = self.workflow.acknowledge_all(&pending).await?;
                    println!("Acknowledged {count} alerts");
                }
            }
            Command::SendCommand(command) => match self.api.send_command(&command).await? {
                Some(receipt) => println!(
                    "Command {} queued{}",
                    receipt.command_id,
                    receipt
                        .message
                        .map(|message| format!(": {message}"))
                        .unwrap_or_default()
                ),
                None => warn!("command was not accepted"),
            },
            Command::Commands { device_key } => {
                print_all(
                    &self.api.commands_for_device(&device_key).await?,
                    "No commands",
                );
            }
            Command::Status => match self.api.device_status().await? {
                Some(status) => println!("{status}"),
                None => println!("No device status"),
            },
            Command::PushToken { token } => {
                self.api.register_push_token(&token).await?;
                info!("push token registered");
                println!("Push token registered");
            }
            Command::Health => match self.api.health().await? {
                Some(health) if health.is_up() => println!("Backend is up"),
                Some(health) => println!("Backend is {}", health.status),
                None => println!("Backend did not report health"),
            },
        }

        Ok(())
    }
}

fn print_all<T: std::fmt::Display>(items: &[T], empty: &str) {
    if items.is_empty() {
        println!("{empty}");
    }

    for item in items {
        println!("{item}\n");
    }
}

/// Out-of-range warnings for the metrics a reading carries.
fn breaches(reading: &SensorReading, thresholds: &[Threshold]) -> Vec<String> {
    thresholds
        .iter()
        .filter_map(|threshold| {
            let value = reading.value(threshold.metric_type)?;
            (!threshold.admits(value)).then(|| {
                format!(
                    "Warning: {} {}{} is outside its threshold",
                    threshold.metric_type,
                    value,
                    threshold.metric_type.unit()
                )
            })
        })
        .collect()
}
