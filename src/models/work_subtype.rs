use serde::Serialize;

/// Kind of work booked on a `work` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkSubtype {
    TimeWithChildren,
    Preparation,
    ParentMeeting,
    Conference,
    SmallTeam,
    Instruction,
    Leadership,
    Management,
    LanguageSupport,
    Training,
    TeamDevelopment,
}

impl WorkSubtype {
    pub const ALL: [WorkSubtype; 11] = [
        WorkSubtype::TimeWithChildren,
        WorkSubtype::Preparation,
        WorkSubtype::ParentMeeting,
        WorkSubtype::Conference,
        WorkSubtype::SmallTeam,
        WorkSubtype::Instruction,
        WorkSubtype::Leadership,
        WorkSubtype::Management,
        WorkSubtype::LanguageSupport,
        WorkSubtype::Training,
        WorkSubtype::TeamDevelopment,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkSubtype::TimeWithChildren => "time_with_children",
            WorkSubtype::Preparation => "preparation",
            WorkSubtype::ParentMeeting => "parent_meeting",
            WorkSubtype::Conference => "conference",
            WorkSubtype::SmallTeam => "small_team",
            WorkSubtype::Instruction => "instruction",
            WorkSubtype::Leadership => "leadership",
            WorkSubtype::Management => "management",
            WorkSubtype::LanguageSupport => "language_support",
            WorkSubtype::Training => "training",
            WorkSubtype::TeamDevelopment => "team_development",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_db_str() == s)
    }

    /// Helper: convert input code from CLI or import files.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&super::normalize_code(code))
    }
}
