use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: String,
    pub time: Option<String>,
    pub db: Option<DatabaseHealth>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub status: String,
    pub sensor_data_count: Option<u64>,
    pub error: Option<String>,
}

impl Health {
    pub fn is_up(&self) -> bool {
        self.status == "UP" && self.db.as_ref().map_or(true, |db| db.status == "UP")
    }
}
