use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    pub id: i64,
    #[serde(deserialize_with = "super::nullable")]
    pub name: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub date_birth: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "super::nullable")]
    pub cpf: String,
    #[serde(deserialize_with = "super::nullable")]
    pub registration_number: String,
    #[serde(deserialize_with = "super::nullable")]
    pub active: bool,
    pub course_id: Option<i64>,
    pub course_name: Option<String>,
}

impl Student {
    pub fn status(&self) -> Status {
        Status::from_flag(self.active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    pub email: Option<String>,
    pub cpf: String,
    pub registration_number: String,
    pub gender: String,
    pub course_id: i64,
    pub date_birth: DateTime<Utc>,
}
