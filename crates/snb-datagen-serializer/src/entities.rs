//! Entity shapes consumed by serializers
//!
//! These carry only what serializers read. The generator owns the full model.

/// Reference to a person by stable identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonSummary {
    pub account_id: i64,
}

/// Directed `knows` edge, owned by the source person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Knows {
    pub to: PersonSummary,
}

impl Knows {
    pub fn new(to: PersonSummary) -> Self {
        Self { to }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyAt {
    pub person: i64,
    pub university: i64,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkAt {
    pub person: i64,
    pub company: i64,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub account_id: i64,
    pub knows: Vec<Knows>,
    pub study_at: Option<StudyAt>,
    pub work_at: Vec<WorkAt>,
}

impl Person {
    pub fn new(account_id: i64) -> Self {
        Self {
            account_id,
            knows: Vec::new(),
            study_at: None,
            work_at: Vec::new(),
        }
    }
}
