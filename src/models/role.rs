use serde::Serialize;

/// Role of a user inside the facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Staff,      // pedagogical staff member
    Leadership, // facility leadership
    Admin,      // system administrator
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Staff, Role::Leadership, Role::Admin];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Leadership => "leadership",
            Role::Admin => "admin",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.to_db_str() == s)
    }

    /// Helper: convert input code from CLI or import files (any case).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&super::normalize_code(code))
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Staff)
    }
}
