use serde::{Deserialize, Serialize};

/// Aggregate counts served by `/api/dashboard/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "super::nullable")]
    pub students: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub teachers: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub courses: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub disciplines: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub semesters: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub departments: u64,
}

impl DashboardStats {
    pub const KEYS: [&'static str; 6] = [
        "students",
        "teachers",
        "courses",
        "disciplines",
        "semesters",
        "departments",
    ];

    pub fn counters(&self) -> [(&'static str, u64); 6] {
        [
            ("students", self.students),
            ("teachers", self.teachers),
            ("courses", self.courses),
            ("disciplines", self.disciplines),
            ("semesters", self.semesters),
            ("departments", self.departments),
        ]
    }
}
