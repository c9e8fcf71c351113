use ecoguard::{
    Alert, AlertId, AuthSession, CommandReceipt, Credentials, DeviceCommand, DeviceStatus,
    DeviceTokenRequest, Health, LoginResponse, QueuedCommand, SensorReading, Threshold,
    ThresholdAudit, ThresholdId, ThresholdPatch, Timestamp,
};
use log::info;

use crate::{
    home_route, resolve_prefix, Error, Method, Reply, RequestGateway, RequestOptions, Result,
    RouteState, LOGIN_ROUTE,
};

const RANGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Typed access to every backend endpoint the dashboard uses. Role-scoped
/// endpoints follow the role of the current session.
#[derive(Clone)]
pub struct Api {
    gateway: RequestGateway,
    routes: RouteState,
}

impl Api {
    pub fn new(gateway: RequestGateway, routes: RouteState) -> Api {
        Api { gateway, routes }
    }

    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    fn prefix(&self) -> &'static str {
        resolve_prefix(self.gateway.session().map(|session| session.role))
    }

    async fn list<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let items = self.gateway.request(path, RequestOptions::get()).await?;
        Ok(items.unwrap_or_default())
    }
}

impl Api {
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let options = RequestOptions::json(Method::Post, &credentials)?;

        let response: LoginResponse = match self.gateway.send("/api/auth/login", options).await? {
            Reply::Json(value) => serde_json::from_value(value)?,
            Reply::AuthExpired => return Err(Error::AuthExpired),
            Reply::Empty | Reply::NotFound => return Err(Error::NoData("login response")),
        };

        let session = AuthSession::from(response);
        self.gateway.store().set(&session)?;
        info!("signed in as {}", session.role);

        self.routes.navigate(home_route(session.role));

        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.gateway.store().clear()?;
        self.routes.navigate(LOGIN_ROUTE);
        Ok(())
    }
}

impl Api {
    pub async fn latest_reading(&self) -> Result<Option<SensorReading>> {
        let path = format!("{}/sensor-data/latest", self.prefix());
        self.gateway.request(&path, RequestOptions::get()).await
    }

    pub async fn readings(&self) -> Result<Vec<SensorReading>> {
        self.list(&format!("{}/sensor-data", self.prefix())).await
    }

    pub async fn readings_between(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<SensorReading>> {
        let query = serde_urlencoded::to_string(&[
            ("start", start.format(RANGE_FORMAT).to_string()),
            ("end", end.format(RANGE_FORMAT).to_string()),
        ])?;

        self.list(&format!("{}/sensor-data/range?{query}", self.prefix()))
            .await
    }
}

impl Api {
    pub async fn thresholds(&self) -> Result<Vec<Threshold>> {
        self.list(&format!("{}/thresholds", self.prefix())).await
    }

    pub async fn update_threshold(
        &self,
        id: ThresholdId,
        patch: &ThresholdPatch,
    ) -> Result<Option<Threshold>> {
        let options = RequestOptions::json(Method::Put, patch)?;
        let path = format!("/api/admin/thresholds/{id}");

        self.gateway.request(&path, options).await
    }

    pub async fn threshold_audits(&self) -> Result<Vec<ThresholdAudit>> {
        self.list("/api/admin/thresholds/audit").await
    }
}

impl Api {
    pub async fn alerts(&self) -> Result<Vec<Alert>> {
        self.list(&format!("{}/alerts", self.prefix())).await
    }

    /// Unlike the read endpoints, a rejected session or a missing alert is
    /// reported as an error so a batch can stop.
    pub async fn acknowledge_alert(&self, id: AlertId) -> Result<()> {
        let path = format!("{}/alerts/{id}/acknowledge", self.prefix());

        match self.gateway.send(&path, RequestOptions::method(Method::Put)).await? {
            Reply::AuthExpired => Err(Error::AuthExpired),
            Reply::NotFound => Err(Error::NoData("alert to acknowledge")),
            Reply::Json(_) | Reply::Empty => Ok(()),
        }
    }
}

impl Api {
    pub async fn send_command(&self, command: &DeviceCommand) -> Result<Option<CommandReceipt>> {
        let options = RequestOptions::json(Method::Post, command)?;
        self.gateway
            .request("/api/admin/device/commands", options)
            .await
    }

    pub async fn commands_for_device(&self, device_key: &str) -> Result<Vec<QueuedCommand>> {
        self.list(&format!("/api/admin/device/commands/by-device/{device_key}"))
            .await
    }

    pub async fn device_status(&self) -> Result<Option<DeviceStatus>> {
        self.gateway
            .request("/api/admin/device/status", RequestOptions::get())
            .await
    }

    pub async fn register_push_token(&self, device_token: &str) -> Result<()> {
        let body = DeviceTokenRequest {
            device_token: device_token.to_string(),
        };
        let options = RequestOptions::json(Method::Put, &body)?;

        match self.gateway.send("/api/auth/device-token", options).await? {
            Reply::AuthExpired => Err(Error::AuthExpired),
            Reply::Json(_) | Reply::Empty | Reply::NotFound => Ok(()),
        }
    }

    pub async fn health(&self) -> Result<Option<Health>> {
        self.gateway
            .request("/api/health", RequestOptions::get())
            .await
    }
}
