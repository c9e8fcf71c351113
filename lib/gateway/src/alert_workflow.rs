use ecoguard::{Alert, AlertId, SensorReading, Threshold};
use log::{debug, error, info};

use crate::{AcknowledgeFailure, Api, Error, Result};

/// Review-and-acknowledge flow for alerts plus the dashboard reads around it.
#[derive(Clone)]
pub struct AlertWorkflow {
    api: Api,
}

impl AlertWorkflow {
    pub fn new(api: Api) -> AlertWorkflow {
        AlertWorkflow { api }
    }

    /// Newest `limit` alerts, newest first.
    pub async fn fetch_recent(&self, limit: usize) -> Result<Vec<Alert>> {
        let mut alerts = self.api.alerts().await?;
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts.truncate(limit);

        debug!("fetched {} recent alerts", alerts.len());

        Ok(alerts)
    }

    /// Acknowledges `ids` one at a time, in order. The first failure stops
    /// the batch; nothing already acknowledged is rolled back.
    pub async fn acknowledge_all(&self, ids: &[AlertId]) -> Result<usize> {
        let mut acknowledged = Vec::with_capacity(ids.len());

        for (index, &id) in ids.iter().enumerate() {
            if let Err(cause) = self.api.acknowledge_alert(id).await {
                error!("unable to acknowledge alert {id}: {cause}");

                return Err(AcknowledgeFailure {
                    acknowledged,
                    failed: id,
                    skipped: ids[index + 1..].to_vec(),
                    cause: Box::new(cause),
                }
                .into());
            }

            debug!("acknowledged alert {id}");
            acknowledged.push(id);
        }

        info!("acknowledged {} alerts", acknowledged.len());

        Ok(acknowledged.len())
    }

    pub async fn fetch_thresholds(&self) -> Result<Vec<Threshold>> {
        self.api.thresholds().await
    }

    /// A dashboard has nothing sensible to show without a latest reading, so
    /// its absence is an error here.
    pub async fn fetch_latest_reading(&self) -> Result<SensorReading> {
        self.api
            .latest_reading()
            .await?
            .ok_or(Error::NoData("latest sensor reading"))
    }

    pub async fn fetch_readings(&self) -> Result<Vec<SensorReading>> {
        let mut readings = self.api.readings().await?;
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::transport::MockTransport;
    use crate::{
        HttpResponse, MemorySessionStore, Method, RequestGateway, RouteState, SessionStore,
        SignOut,
    };
    use ecoguard::{AuthSession, Role};
    use mockall::Sequence;
    use serde_json::json;

    fn respond(status: u16, body: &str) -> std::result::Result<HttpResponse, crate::ErasedError> {
        Ok(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
        })
    }

    fn workflow(transport: MockTransport) -> AlertWorkflow {
        let store = Arc::new(MemorySessionStore::new());
        store.set(&AuthSession::new("abc", Role::User)).unwrap();

        let routes = RouteState::new("/user");
        let sign_out = SignOut::new(store.clone(), routes.clone());
        let gateway = RequestGateway::new(Arc::new(transport), store, Arc::new(sign_out));

        AlertWorkflow::new(Api::new(gateway, routes))
    }

    fn alerts_body(count: u32) -> String {
        // shuffled so that the server order is not the time order
        let alerts = (1..=count)
            .map(|id| {
                let minute = (id * 7) % count;
                json!({
                    "id": id,
                    "alertType": "THRESHOLD",
                    "metricType": "TEMP",
                    "value": 30.0,
                    "timestamp": format!("2024-03-01T10:{minute:02}:00"),
                    "acknowledged": false
                })
            })
            .collect::<Vec<_>>();

        serde_json::to_string(&alerts).unwrap()
    }

    fn acknowledge_path(id: AlertId) -> String {
        format!("/api/user/alerts/{id}/acknowledge")
    }

    #[tokio::test]
    async fn test_fetch_recent_limits_and_orders() {
        let body = alerts_body(15);

        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.path == "/api/user/alerts")
            .times(1)
            .returning(move |_| respond(200, &body));

        let alerts = workflow(transport).fetch_recent(10).await.unwrap();

        assert_eq!(alerts.len(), 10);
        assert!(alerts
            .windows(2)
            .all(|pair| pair[0].timestamp > pair[1].timestamp));
        assert_eq!(alerts[0].timestamp.to_string(), "2024-03-01 10:14:00");
        assert_eq!(alerts[9].timestamp.to_string(), "2024-03-01 10:05:00");
    }

    #[tokio::test]
    async fn test_fetch_recent_without_alerts() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| respond(200, "[]"));

        let alerts = workflow(transport).fetch_recent(10).await.unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_recent_with_zero_limit() {
        let body = alerts_body(3);

        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(move |_| respond(200, &body));

        assert!(workflow(transport).fetch_recent(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_acknowledge_all_in_order() {
        let mut transport = MockTransport::new();
        let mut sequence = Sequence::new();

        for id in [3, 1, 2] {
            transport
                .expect_send()
                .withf(move |request| {
                    request.method == Method::Put && request.path == acknowledge_path(id)
                })
                .times(1)
                .in_sequence(&mut sequence)
                .returning(|_| respond(200, ""));
        }

        let count = workflow(transport).acknowledge_all(&[3, 1, 2]).await.unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_acknowledge_all_stops_at_first_failure() {
        let mut transport = MockTransport::new();
        let mut sequence = Sequence::new();

        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(1))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| respond(200, ""));
        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(2))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| respond(500, "database unavailable"));
        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(3))
            .times(0);

        let result = workflow(transport).acknowledge_all(&[1, 2, 3]).await;

        match result {
            Err(Error::Acknowledge(failure)) => {
                assert_eq!(failure.acknowledged, vec![1]);
                assert_eq!(failure.failed, 2);
                assert_eq!(failure.skipped, vec![3]);
                assert!(matches!(
                    *failure.cause,
                    Error::Http { status: 500, .. }
                ));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_acknowledge_all_treats_missing_alert_as_failure() {
        let mut transport = MockTransport::new();
        let mut sequence = Sequence::new();

        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(1))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| respond(200, ""));
        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(2))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| respond(404, ""));
        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(3))
            .times(0);

        let result = workflow(transport).acknowledge_all(&[1, 2, 3]).await;

        match result {
            Err(Error::Acknowledge(failure)) => {
                assert_eq!(failure.acknowledged, vec![1]);
                assert_eq!(failure.failed, 2);
                assert_eq!(failure.skipped, vec![3]);
                assert!(matches!(*failure.cause, Error::NoData(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_acknowledge_all_stops_on_network_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(7))
            .times(1)
            .returning(|_| Err("timed out".into()));

        let result = workflow(transport).acknowledge_all(&[7, 8]).await;

        match result {
            Err(Error::Acknowledge(failure)) => {
                assert!(failure.acknowledged.is_empty());
                assert_eq!(failure.skipped, vec![8]);
                assert!(matches!(*failure.cause, Error::Network(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_acknowledge_all_stops_when_session_expires() {
        let mut transport = MockTransport::new();
        let mut sequence = Sequence::new();

        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(1))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| respond(200, ""));
        transport
            .expect_send()
            .withf(|request| request.path == acknowledge_path(2))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| respond(401, ""));

        let result = workflow(transport).acknowledge_all(&[1, 2, 3]).await;

        match result {
            Err(Error::Acknowledge(failure)) => {
                assert_eq!(failure.acknowledged, vec![1]);
                assert_eq!(failure.failed, 2);
                assert_eq!(failure.skipped, vec![3]);
                assert!(matches!(*failure.cause, Error::AuthExpired));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_acknowledge_nothing() {
        let count = workflow(MockTransport::new())
            .acknowledge_all(&[])
            .await
            .unwrap();

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_thresholds_empty_is_not_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.path == "/api/user/thresholds")
            .times(1)
            .returning(|_| respond(404, ""));

        assert!(workflow(transport).fetch_thresholds().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_latest_reading_is_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.path == "/api/user/sensor-data/latest")
            .times(1)
            .returning(|_| respond(404, ""));

        let result = workflow(transport).fetch_latest_reading().await;
        assert!(matches!(result, Err(Error::NoData(_))));
    }

    #[tokio::test]
    async fn test_latest_reading() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| {
                respond(
                    200,
                    r#"{"id":1,"timestamp":"2024-03-01T10:00:00","temperature":22.5,"humidity":41.0,"co2Level":700,"lightLevel":250}"#,
                )
            });

        let reading = workflow(transport).fetch_latest_reading().await.unwrap();
        assert_eq!(reading.co2, Some(700));
    }

    #[tokio::test]
    async fn test_readings_newest_first() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            respond(
                200,
                r#"[
                    {"timestamp":"2024-03-01T09:00:00","temperature":1.0,"humidity":null,"co2Level":null,"lightLevel":null},
                    {"timestamp":"2024-03-01T11:00:00","temperature":3.0,"humidity":null,"co2Level":null,"lightLevel":null},
                    {"timestamp":"2024-03-01T10:00:00","temperature":2.0,"humidity":null,"co2Level":null,"lightLevel":null}
                ]"#,
            )
        });

        let readings = workflow(transport).fetch_readings().await.unwrap();
        let temperatures = readings
            .iter()
            .map(|reading| reading.temperature.unwrap())
            .collect::<Vec<_>>();

        assert_eq!(temperatures, vec![3.0, 2.0, 1.0]);
    }
}
