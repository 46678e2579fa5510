use serde::Serialize;

/// Category of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Work,
    Sick,
    ChildSick,
    Vacation,
    EducationLeave,
    Observation,
    Internship,
}

impl EntryType {
    pub const ALL: [EntryType; 7] = [
        EntryType::Work,
        EntryType::Sick,
        EntryType::ChildSick,
        EntryType::Vacation,
        EntryType::EducationLeave,
        EntryType::Observation,
        EntryType::Internship,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryType::Work => "work",
            EntryType::Sick => "sick",
            EntryType::ChildSick => "child_sick",
            EntryType::Vacation => "vacation",
            EntryType::EducationLeave => "education_leave",
            EntryType::Observation => "observation",
            EntryType::Internship => "internship",
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

    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Work => "Work time",
            EntryType::Sick => "Sick",
            EntryType::ChildSick => "Child sick",
            EntryType::Vacation => "Vacation",
            EntryType::EducationLeave => "Education leave",
            EntryType::Observation => "Observation",
            EntryType::Internship => "Internship",
        }
    }

    pub fn is_work(&self) -> bool {
        matches!(self, EntryType::Work)
    }
}
