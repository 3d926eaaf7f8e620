use serde::Serialize;

/// Soft-delete state of a Student or Teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Active -> Inactive.
    Deactivate,
    /// Inactive -> Active.
    Reactivate,
}

impl Status {
    pub fn from_flag(active: bool) -> Self {
        if active { Status::Active } else { Status::Inactive }
    }

    pub fn is_active(self) -> bool {
        self == Status::Active
    }

    /// The single transition allowed out of this state.
    pub fn available_transition(self) -> Transition {
        match self {
            Status::Active => Transition::Deactivate,
            Status::Inactive => Transition::Reactivate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_state_has_one_transition() {
        assert_eq!(Status::Active.available_transition(), Transition::Deactivate);
        assert_eq!(Status::Inactive.available_transition(), Transition::Reactivate);
        assert!(Status::from_flag(true).is_active());
        assert!(!Status::from_flag(false).is_active());
    }
}
