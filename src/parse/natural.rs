use super::Candidate;

use regex::Regex;
use std::sync::LazyLock;

// Capture:
// 1) name: shortest leading run of letters . ' - and spaces
// 2) grade: 1-2 ASCII digits, optionally preceded by "kelas"
// 3) track: alphanumeric token ending at a word boundary
// 4) school: optional "- ..." suffix
// Anything after the track that is not a "- school" suffix is ignored.
static NATURAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([a-z.'\- ]+?)\s*,?\s*(?:kelas\s*)?([0-9]{1,2})\s*([a-z0-9]+)\b(?:\s*-\s*(.*))?",
    )
    .expect("natural-language pattern is valid")
});

/// `name [,] [kelas] grade track [- school]`.
pub fn match_line(line: &str) -> Option<Candidate> {
    let caps = NATURAL_RE.captures(line)?;

    let name = caps.get(1)?.as_str().trim();
    if !name.chars().any(char::is_alphabetic) {
        return None;
    }

    // Grades are at most two digits; a longer run rejects the line.
    let grade = caps.get(2)?;
    if line[grade.end()..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let grade = grade.as_str();

    Some(Candidate {
        name: name.to_string(),
        grade: grade.to_string(),
        track: caps.get(3)?.as_str().to_string(),
        school: caps
            .get(4)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty()),
    })
}
