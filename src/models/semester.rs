use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Semester {
    pub id: i64,
    #[serde(deserialize_with = "super::nullable")]
    pub year: i32,
    #[serde(deserialize_with = "super::nullable")]
    pub period: i32,
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.year, self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterPayload {
    pub year: i32,
    pub period: i32,
}
