pub mod course;
pub mod dashboard;
pub mod dates;
pub mod department;
pub mod discipline;
pub mod semester;
pub mod status;
pub mod student;
pub mod teacher;

use serde::{Deserialize, Deserializer};

pub use course::{Course, CoursePayload};
pub use dashboard::DashboardStats;
pub use department::{Department, DepartmentPayload};
pub use discipline::{Discipline, DisciplinePayload};
pub use semester::{Semester, SemesterPayload};
pub use status::{Status, Transition};
pub use student::{Student, StudentPayload};
pub use teacher::{Teacher, TeacherPayload};

/// Explicit `null` reads as the field's default, like a missing field does.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
