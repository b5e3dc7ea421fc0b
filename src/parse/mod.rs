//! Line parser for free-text student entries.
//!
//! Each surface syntax is a pure matcher `&str -> Option<Candidate>`. They are
//! tried in `MATCHERS` order; the first hit wins. Normalization (track case,
//! school resolution) happens once here, after a matcher succeeds.

pub mod delimited;
pub mod natural;

use crate::record::Record;
use crate::schools::Classifier;

use thiserror::Error;

/// Fields pulled out of a line before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub grade: String,
    pub track: String,
    /// Only set when the line names the school explicitly.
    pub school: Option<String>,
}

impl Candidate {
    pub fn into_record(self, classifier: &Classifier) -> Record {
        let track = self.track.trim().to_uppercase();
        let school = classifier.resolve_school(&track, self.school.as_deref());
        Record {
            name: self.name.trim().to_string(),
            grade: self.grade.trim().to_string(),
            track,
            school,
        }
    }
}

pub type Matcher = fn(&str) -> Option<Candidate>;

/// Priority order: delimiter form before natural-language form.
pub const MATCHERS: [(&str, Matcher); 2] = [
    ("delimited", delimited::match_line),
    ("natural", natural::match_line),
];

/// A line no matcher recognized. Carries the line for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized record line: {line:?}")]
pub struct ParseFailure {
    pub line: String,
}

pub fn parse_line(line: &str, classifier: &Classifier) -> Result<Record, ParseFailure> {
    let trimmed = line.trim();
    MATCHERS
        .iter()
        .find_map(|(label, matcher)| {
            let candidate = matcher(trimmed)?;
            tracing::debug!(matcher = *label, name = %candidate.name, "line matched");
            Some(candidate)
        })
        .map(|c| c.into_record(classifier))
        .ok_or_else(|| ParseFailure {
            line: line.to_string(),
        })
}
