//! Grouping model: School -> Track -> Grade -> [Record], with subtree counts.
//!
//! Counts are recomputed on every call; nothing here is cached between calls.

use crate::record::Record;
use crate::schools::DEFAULT_GRADES;

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    pub count: usize,
    pub schools: Vec<SchoolNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolNode {
    pub school: String,
    pub count: usize,
    pub tracks: Vec<TrackNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackNode {
    pub track: String,
    pub count: usize,
    pub grades: Vec<GradeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeNode {
    pub grade: String,
    pub count: usize,
    /// Sorted case-insensitively by name.
    pub records: Vec<Record>,
}

impl Tree {
    /// Per-school totals in tree order.
    pub fn school_counts(&self) -> Vec<(&str, usize)> {
        self.schools
            .iter()
            .map(|s| (s.school.as_str(), s.count))
            .collect()
    }
}

/// Group with the default known-grade order ("10", "11", "12").
pub fn group(records: &[Record]) -> Tree {
    let order: Vec<String> = DEFAULT_GRADES.iter().map(|g| g.to_string()).collect();
    group_with_order(records, &order)
}

/// Group records; `known_grades` ranks non-numeric grades before lexicographic fallback.
pub fn group_with_order(records: &[Record], known_grades: &[String]) -> Tree {
    // Phase 1: bucket by school and track (BTreeMap gives lexicographic order).
    let mut buckets: BTreeMap<&str, BTreeMap<&str, Vec<&Record>>> = BTreeMap::new();
    for r in records {
        buckets
            .entry(r.school.as_str())
            .or_default()
            .entry(r.track.as_str())
            .or_default()
            .push(r);
    }

    // Phase 2: split each track by grade and order every level.
    let mut schools = Vec::with_capacity(buckets.len());
    for (school, tracks) in buckets {
        let mut track_nodes = Vec::with_capacity(tracks.len());
        for (track, members) in tracks {
            let mut by_grade: BTreeMap<GradeKey, Vec<Record>> = BTreeMap::new();
            for r in members {
                by_grade
                    .entry(GradeKey::new(&r.grade, known_grades))
                    .or_default()
                    .push(r.clone());
            }

            let grades: Vec<GradeNode> = by_grade
                .into_iter()
                .map(|(key, mut records)| {
                    records.sort_by(compare_names);
                    GradeNode {
                        grade: key.into_grade(),
                        count: records.len(),
                        records,
                    }
                })
                .collect();

            track_nodes.push(TrackNode {
                track: track.to_string(),
                count: grades.iter().map(|g| g.count).sum(),
                grades,
            });
        }

        schools.push(SchoolNode {
            school: school.to_string(),
            count: track_nodes.iter().map(|t| t.count).sum(),
            tracks: track_nodes,
        });
    }

    Tree {
        count: schools.iter().map(|s| s.count).sum(),
        schools,
    }
}

/// Grade ordering: integers numerically, then grades from the known list by
/// position, then everything else lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum GradeKey {
    Numeric(i64, String),
    Known(usize, String),
    Other(String),
}

impl GradeKey {
    fn new(grade: &str, known: &[String]) -> Self {
        if let Ok(n) = grade.parse::<i64>() {
            return GradeKey::Numeric(n, grade.to_string());
        }
        match known.iter().position(|k| k == grade) {
            Some(pos) => GradeKey::Known(pos, grade.to_string()),
            None => GradeKey::Other(grade.to_string()),
        }
    }

    fn into_grade(self) -> String {
        match self {
            GradeKey::Numeric(_, g) | GradeKey::Known(_, g) | GradeKey::Other(g) => g,
        }
    }
}

fn compare_names(a: &Record, b: &Record) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(name: &str, grade: &str, track: &str, school: &str) -> Record {
        Record {
            name: name.into(),
            grade: grade.into(),
            track: track.into(),
            school: school.into(),
        }
    }

    fn grade_labels(tree: &Tree) -> Vec<&str> {
        tree.schools[0].tracks[0]
            .grades
            .iter()
            .map(|g| g.grade.as_str())
            .collect()
    }

    #[test]
    fn grades_sort_numerically() {
        let records = vec![
            rec("A", "12", "PPLG", "S"),
            rec("B", "10", "PPLG", "S"),
            rec("C", "11", "PPLG", "S"),
        ];
        assert_eq!(grade_labels(&group(&records)), vec!["10", "11", "12"]);

        let wide = vec![rec("A", "9", "T", "S"), rec("B", "10", "T", "S")];
        assert_eq!(grade_labels(&group(&wide)), vec!["9", "10"]);
    }

    #[test]
    fn known_grades_before_unknown_ones() {
        let order: Vec<String> = vec!["X".into(), "XI".into(), "XII".into()];
        let records = vec![
            rec("A", "lulus", "T", "S"),
            rec("B", "XII", "T", "S"),
            rec("C", "X", "T", "S"),
            rec("D", "10", "T", "S"),
            rec("E", "alumni", "T", "S"),
        ];
        let tree = group_with_order(&records, &order);
        assert_eq!(grade_labels(&tree), vec!["10", "X", "XII", "alumni", "lulus"]);
    }

    #[test]
    fn levels_ordered_and_counted() {
        let records = vec![
            rec("zaki", "10", "TLM", "SMK Kesehatan Airlangga"),
            rec("Rina", "11", "PPLG", "SMK Airlangga"),
            rec("ahmad", "10", "AKL", "SMK Airlangga"),
            rec("Budi", "10", "AKL", "SMK Airlangga"),
            rec("Ayu", "10", "TLM", "SMK Kesehatan Airlangga"),
        ];
        let tree = group(&records);

        assert_eq!(tree.count, 5);
        assert_eq!(
            tree.school_counts(),
            vec![("SMK Airlangga", 3), ("SMK Kesehatan Airlangga", 2)]
        );

        let airlangga = &tree.schools[0];
        let tracks: Vec<(&str, usize)> = airlangga
            .tracks
            .iter()
            .map(|t| (t.track.as_str(), t.count))
            .collect();
        assert_eq!(tracks, vec![("AKL", 2), ("PPLG", 1)]);

        let akl_10: Vec<&str> = airlangga.tracks[0].grades[0]
            .records
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(akl_10, vec!["ahmad", "Budi"]);

        let tlm_10: Vec<&str> = tree.schools[1].tracks[0].grades[0]
            .records
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(tlm_10, vec!["Ayu", "zaki"]);
    }

    #[test]
    fn grouping_twice_gives_identical_trees() {
        let records = vec![
            rec("B", "12", "DKV", "SMK Airlangga"),
            rec("a", "12", "DKV", "SMK Airlangga"),
            rec("C", "10", "FKK", "SMK Kesehatan Airlangga"),
            rec("D", "11", "ZZZ", "Unknown"),
        ];
        assert_eq!(group(&records), group(&records));
    }

    #[test]
    fn empty_input_gives_empty_tree() {
        let tree = group(&[]);
        assert_eq!(tree.count, 0);
        assert!(tree.schools.is_empty());
    }
}
