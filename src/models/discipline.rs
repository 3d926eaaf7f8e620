use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Discipline {
    pub id: i64,
    #[serde(deserialize_with = "super::nullable")]
    pub name: String,
    #[serde(deserialize_with = "super::nullable")]
    pub code: String,
    #[serde(deserialize_with = "super::nullable")]
    pub credits: i32,
    #[serde(deserialize_with = "super::nullable")]
    pub workload_hours: i32,
    pub description: Option<String>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplinePayload {
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub workload_hours: i32,
    pub description: Option<String>,
    pub department_id: i64,
}
