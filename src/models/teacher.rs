use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Teacher {
    pub id: i64,
    #[serde(deserialize_with = "super::nullable")]
    pub name: String,
    #[serde(deserialize_with = "super::nullable")]
    pub email: String,
    #[serde(deserialize_with = "super::nullable")]
    pub cpf: String,
    #[serde(deserialize_with = "super::nullable")]
    pub telephone: String,
    #[serde(deserialize_with = "super::nullable")]
    pub active: bool,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub date_contract: Option<DateTime<Utc>>,
}

impl Teacher {
    pub fn status(&self) -> Status {
        Status::from_flag(self.active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherPayload {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub telephone: String,
    pub department_id: i64,
    pub date_contract: DateTime<Utc>,
}
