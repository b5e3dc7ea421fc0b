//! The roster: record collection + dedup registry, kept in sync.
//!
//! Every mutation goes through `&mut self` and checks before it writes, so a
//! failed operation leaves both halves untouched. A concurrent host should put
//! the whole `Store` behind one lock.

use crate::group::{Tree, group_with_order};
use crate::parse::parse_line;
use crate::record::{RawFields, Record, name_key};
use crate::registry::Registry;
use crate::schools::Classifier;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    #[error("a student named {name:?} already exists")]
    Duplicate { name: String },

    #[error("no student named {name:?}")]
    NotFound { name: String },
}

/// Outcome of one bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: Vec<Record>,
    /// Lines no matcher recognized, as given (line ending stripped).
    pub rejected: Vec<String>,
    /// Parsed lines dropped because the name was already present.
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    classifier: Classifier,
    records: Vec<Record>,
    registry: Registry,
}

impl Store {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            records: Vec::new(),
            registry: Registry::new(),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Records in admission order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.position(name).map(|idx| &self.records[idx])
    }

    /// Parse a block of free text and admit every new, well-formed line.
    ///
    /// Bad lines are data: they land in `rejected` and processing continues.
    pub fn import_text(&mut self, text: &str) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for (lineno, line) in text.lines().enumerate() {
            let lno = lineno + 1;
            if line.trim().is_empty() {
                continue;
            }

            let record = match parse_line(line, &self.classifier) {
                Ok(r) => r,
                Err(failure) => {
                    tracing::debug!(line = lno, text = %failure.line, "rejected line");
                    summary.rejected.push(failure.line);
                    continue;
                }
            };

            if self.admit(record.clone()) {
                summary.added.push(record);
            } else {
                tracing::debug!(line = lno, name = %record.name, "duplicate name skipped");
                summary.duplicates += 1;
            }
        }

        tracing::info!(
            added = summary.added.len(),
            rejected = summary.rejected.len(),
            duplicates = summary.duplicates,
            "import finished"
        );
        summary
    }

    /// Admit decoded flat-file rows through the same dedup gate. Returns the
    /// number of rows added.
    pub fn load(&mut self, rows: Vec<RawFields>) -> usize {
        let mut added = 0;
        for row in rows {
            let name = row.name.trim();
            if name.is_empty() {
                tracing::debug!("skipping stored row without a name");
                continue;
            }
            let track = row.track.trim().to_uppercase();
            let record = Record {
                name: name.to_string(),
                grade: row.grade.trim().to_string(),
                school: self.classifier.resolve_school(&track, Some(row.school.as_str())),
                track,
            };
            if self.admit(record) {
                added += 1;
            }
        }
        added
    }

    /// Manual entry. Every field is required; the caller picks school and
    /// track from its own closed lists.
    pub fn add_one(
        &mut self,
        name: &str,
        grade: &str,
        track: &str,
        school: &str,
    ) -> Result<&Record, RosterError> {
        let name = required("name", name)?;
        let grade = required("grade", grade)?;
        let track = required("track", track)?.to_uppercase();
        let school = required("school", school)?;

        if self.registry.contains(name) {
            return Err(RosterError::Duplicate {
                name: name.to_string(),
            });
        }

        let idx = self.records.len();
        self.push(Record {
            name: name.to_string(),
            grade: grade.to_string(),
            track,
            school: school.to_string(),
        });
        Ok(&self.records[idx])
    }

    /// Rename in place. The registry swaps the old key for the new one only
    /// after both checks pass.
    pub fn rename(&mut self, current: &str, new_name: &str) -> Result<&Record, RosterError> {
        let idx = self.position(current).ok_or_else(|| RosterError::NotFound {
            name: current.trim().to_string(),
        })?;
        let new_name = required("name", new_name)?;

        let old_key = self.records[idx].key();
        if name_key(new_name) != old_key && self.registry.contains(new_name) {
            return Err(RosterError::Duplicate {
                name: new_name.to_string(),
            });
        }

        self.registry.release(&old_key);
        self.registry.admit(new_name);
        self.records[idx].name = new_name.to_string();
        Ok(&self.records[idx])
    }

    pub fn remove(&mut self, name: &str) -> Option<Record> {
        let idx = self.position(name)?;
        let record = self.records.remove(idx);
        self.registry.release(&record.name);
        Some(record)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.registry.clear();
    }

    /// Replace the roster with the demo students.
    pub fn load_sample(&mut self) {
        self.clear();
        for r in sample_records() {
            self.admit(r);
        }
    }

    /// Case-insensitive substring match over name, grade and track.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let q = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                q.is_empty()
                    || r.name.to_lowercase().contains(&q)
                    || r.grade.to_lowercase().contains(&q)
                    || r.track.to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Group the whole roster using the configured grade order.
    pub fn tree(&self) -> Tree {
        group_with_order(&self.records, self.classifier.grades())
    }

    fn admit(&mut self, record: Record) -> bool {
        if self.registry.contains(&record.name) {
            return false;
        }
        self.push(record);
        true
    }

    fn push(&mut self, record: Record) {
        self.registry.admit(&record.name);
        self.records.push(record);
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = name_key(name);
        self.records.iter().position(|r| r.key() == key)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RosterError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(RosterError::Validation { field });
    }
    Ok(v)
}

/// The six demo students.
pub fn sample_records() -> Vec<Record> {
    [
        ("Rina Safitri", "11", "PPLG", "SMK Airlangga"),
        ("Ahmad Fauzi", "10", "AKL", "SMK Airlangga"),
        ("Siti Nurhaliza", "12", "TJKT", "SMK Airlangga"),
        ("Budi Santoso", "11", "AKC", "SMK Kesehatan Airlangga"),
        ("Maya Sari", "10", "FKK", "SMK Kesehatan Airlangga"),
        ("Dika Pratama", "12", "TLM", "SMK Kesehatan Airlangga"),
    ]
    .into_iter()
    .map(|(name, grade, track, school)| Record {
        name: name.to_string(),
        grade: grade.to_string(),
        track: track.to_string(),
        school: school.to_string(),
    })
    .collect()
}
