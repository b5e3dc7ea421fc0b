//! School table (schools.json) and the track classifier built from it.
//!
//! JSON shape:
//! {
//!   "schools": [
//!     { "name": "SMK Airlangga", "tracks": ["AKL", "DKV", "MPLB", "PPLG", "TJKT"] },
//!     { "name": "SMK Kesehatan Airlangga", "tracks": ["AKC", "FKK", "TLM"] }
//!   ],
//!   "unknown": "Unknown",          // optional, sentinel school
//!   "grades": ["10", "11", "12"]   // optional, known grade order
//! }
//!
//! We validate names, upper-case track codes, and reject a track owned by two
//! schools.

use crate::Result;
use crate::diagnostics;

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

pub const UNKNOWN_SCHOOL: &str = "Unknown";

pub const DEFAULT_GRADES: [&str; 3] = ["10", "11", "12"];

const DEFAULT_SCHOOLS: [(&str, &[&str]); 2] = [
    ("SMK Airlangga", &["AKL", "DKV", "MPLB", "PPLG", "TJKT"]),
    ("SMK Kesehatan Airlangga", &["AKC", "FKK", "TLM"]),
];

#[derive(Debug, Clone, Deserialize)]
pub struct SchoolsSpec {
    #[serde(default)]
    pub schools: Vec<RawSchool>,

    #[serde(default)]
    pub unknown: Option<String>,

    #[serde(default)]
    pub grades: Vec<String>,
}

/// Raw school row as it appears in schools.json.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSchool {
    pub name: String,

    #[serde(default)]
    pub tracks: Vec<String>,
}

impl SchoolsSpec {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse schools.json")
    }

    /// Normalize rows and check that:
    /// - school names are non-empty and unique
    /// - every track code is non-empty and owned by exactly one school
    /// - the sentinel and the grade order are usable
    pub fn validate_and_build(&self) -> Result<Classifier> {
        if self.schools.is_empty() {
            bail!(
                "{}",
                diagnostics::error_message("schools.json contained no schools")
            );
        }

        let mut schools: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut owner: BTreeMap<String, String> = BTreeMap::new();

        for raw in &self.schools {
            let name = raw.name.trim();
            if name.is_empty() {
                bail!(
                    "{}",
                    diagnostics::error_message("school with an empty name in schools.json")
                );
            }
            if schools.contains_key(name) {
                bail!(
                    "{}",
                    diagnostics::error_message(format!("duplicate school in schools.json: {}", name))
                );
            }
            if raw.tracks.is_empty() {
                diagnostics::warn(format!("school '{}' has no tracks", name));
            }

            let mut tracks = BTreeSet::new();
            for t in &raw.tracks {
                let code = t.trim().to_uppercase();
                if code.is_empty() {
                    bail!(
                        "{}",
                        diagnostics::error_message(format!("school '{}' lists an empty track code", name))
                    );
                }
                if let Some(prev) = owner.insert(code.clone(), name.to_string()) {
                    if prev != name {
                        bail!(
                            "{}",
                            diagnostics::error_message(format!(
                                "track '{}' is assigned to multiple schools: {} and {}",
                                code, prev, name
                            ))
                        );
                    }
                }
                tracks.insert(code);
            }
            schools.insert(name.to_string(), tracks);
        }

        let unknown = match self.unknown.as_deref().map(str::trim) {
            None => UNKNOWN_SCHOOL.to_string(),
            Some("") => bail!(
                "{}",
                diagnostics::error_message("sentinel school name cannot be empty")
            ),
            Some(s) => s.to_string(),
        };

        let grades: Vec<String> = if self.grades.is_empty() {
            DEFAULT_GRADES.iter().map(|g| g.to_string()).collect()
        } else {
            let mut seen = BTreeSet::new();
            for g in &self.grades {
                if !seen.insert(g.trim()) {
                    bail!(
                        "{}",
                        diagnostics::error_message(format!("grade '{}' listed twice", g.trim()))
                    );
                }
            }
            self.grades.iter().map(|g| g.trim().to_string()).collect()
        };

        Ok(Classifier {
            schools,
            owner,
            unknown,
            grades,
        })
    }
}

/// Maps a track code to its owning school. Pure lookups only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    schools: BTreeMap<String, BTreeSet<String>>,
    owner: BTreeMap<String, String>,
    unknown: String,
    grades: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        let mut schools: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut owner: BTreeMap<String, String> = BTreeMap::new();
        for (name, tracks) in DEFAULT_SCHOOLS {
            for t in tracks {
                owner.insert(t.to_string(), name.to_string());
            }
            schools.insert(
                name.to_string(),
                tracks.iter().map(|t| t.to_string()).collect(),
            );
        }
        Self {
            schools,
            owner,
            unknown: UNKNOWN_SCHOOL.to_string(),
            grades: DEFAULT_GRADES.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl Classifier {
    pub fn classify(&self, track: &str) -> Option<&str> {
        self.owner
            .get(&track.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Explicit school if non-blank, else the classifier's answer, else the sentinel.
    pub fn resolve_school(&self, track: &str, explicit: Option<&str>) -> String {
        match explicit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.to_string(),
            None => self
                .classify(track)
                .unwrap_or(self.unknown.as_str())
                .to_string(),
        }
    }

    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    /// Known grade order used by the grouping comparator.
    pub fn grades(&self) -> &[String] {
        &self.grades
    }

    pub fn schools(&self) -> impl Iterator<Item = &str> {
        self.schools.keys().map(String::as_str)
    }

    pub fn tracks_of(&self, school: &str) -> Option<impl Iterator<Item = &str>> {
        self.schools
            .get(school)
            .map(|tracks| tracks.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_table_matches_both_schools() {
        let c = Classifier::default();
        assert_eq!(c.classify("PPLG"), Some("SMK Airlangga"));
        assert_eq!(c.classify("pplg"), Some("SMK Airlangga"));
        assert_eq!(c.classify(" tlm "), Some("SMK Kesehatan Airlangga"));
        assert_eq!(c.classify("XYZ"), None);
    }

    #[test]
    fn unresolved_track_falls_back_to_sentinel() {
        let c = Classifier::default();
        assert_eq!(c.resolve_school("XYZ", None), "Unknown");
        assert_eq!(c.resolve_school("XYZ", Some("   ")), "Unknown");
        assert_eq!(c.resolve_school("AKC", None), "SMK Kesehatan Airlangga");
        assert_eq!(c.resolve_school("AKC", Some(" SMK Lain ")), "SMK Lain");
    }

    #[test]
    fn json_table_builds_custom_classifier() {
        let spec = SchoolsSpec::from_json(
            r#"{
                "schools": [
                    { "name": "North High", "tracks": ["sci", "Art"] },
                    { "name": "South High", "tracks": ["ENG"] }
                ],
                "unknown": "Unassigned",
                "grades": ["7", "8", "9"]
            }"#,
        )
        .unwrap();
        let c = spec.validate_and_build().unwrap();

        assert_eq!(c.classify("SCI"), Some("North High"));
        assert_eq!(c.classify("eng"), Some("South High"));
        assert_eq!(c.resolve_school("MATH", None), "Unassigned");
        assert_eq!(c.grades(), ["7", "8", "9"]);
        assert_eq!(c.schools().collect::<Vec<_>>(), vec!["North High", "South High"]);
        assert_eq!(
            c.tracks_of("North High").unwrap().collect::<Vec<_>>(),
            vec!["ART", "SCI"]
        );
    }

    #[test]
    fn json_table_defaults_sentinel_and_grades() {
        let spec = SchoolsSpec::from_json(r#"{ "schools": [ { "name": "A", "tracks": ["X"] } ] }"#)
            .unwrap();
        let c = spec.validate_and_build().unwrap();
        assert_eq!(c.unknown(), UNKNOWN_SCHOOL);
        assert_eq!(c.grades(), ["10", "11", "12"]);
    }

    #[test]
    fn rejects_track_shared_by_two_schools() {
        let spec = SchoolsSpec::from_json(
            r#"{ "schools": [
                { "name": "A", "tracks": ["AKL"] },
                { "name": "B", "tracks": ["akl"] }
            ] }"#,
        )
        .unwrap();
        let err = spec.validate_and_build().unwrap_err().to_string();
        assert!(err.contains("multiple schools"), "{err}");
    }

    #[test]
    fn rejects_empty_and_duplicate_schools() {
        let empty = SchoolsSpec::from_json(r#"{ "schools": [] }"#).unwrap();
        assert!(empty.validate_and_build().is_err());

        let dup = SchoolsSpec::from_json(
            r#"{ "schools": [ { "name": "A", "tracks": [] }, { "name": " A ", "tracks": [] } ] }"#,
        )
        .unwrap();
        assert!(dup.validate_and_build().is_err());

        let blank_sentinel = SchoolsSpec::from_json(
            r#"{ "schools": [ { "name": "A", "tracks": ["X"] } ], "unknown": " " }"#,
        )
        .unwrap();
        assert!(blank_sentinel.validate_and_build().is_err());
    }
}
