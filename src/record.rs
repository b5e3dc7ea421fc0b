use serde::Serialize;

/// One admitted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    pub grade: String,
    pub track: String,
    pub school: String,
}

impl Record {
    pub fn key(&self) -> String {
        name_key(&self.name)
    }
}

/// The four fields of one persisted line, exactly as decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFields {
    pub name: String,
    pub grade: String,
    pub track: String,
    pub school: String,
}

impl From<&Record> for RawFields {
    fn from(r: &Record) -> Self {
        Self {
            name: r.name.clone(),
            grade: r.grade.clone(),
            track: r.track.clone(),
            school: r.school.clone(),
        }
    }
}

/// Uniqueness key: trimmed, lowercased name.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
