use super::Candidate;

/// Hyphen-like separators folded to ASCII `-` before splitting.
const DASHES: [char; 2] = ['\u{2013}', '\u{2014}'];

/// `name - grade - track [- school]`.
///
/// Empty segments are dropped; anything other than 3 or 4 segments is no match.
pub fn match_line(line: &str) -> Option<Candidate> {
    let norm = line.replace(DASHES, "-");
    let parts: Vec<&str> = norm
        .split('-')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let (name, grade, track, school) = match parts.as_slice() {
        [name, grade, track] => (name, grade, track, None),
        [name, grade, track, school] => (name, grade, track, Some(school.to_string())),
        _ => return None,
    };

    Some(Candidate {
        name: name.to_string(),
        grade: grade.to_string(),
        track: track.to_string(),
        school,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn em_dash_and_spacing() {
        let c = match_line("Maya Sari\u{2014}10 -FKK").unwrap();
        assert_eq!(
            c,
            Candidate {
                name: "Maya Sari".into(),
                grade: "10".into(),
                track: "FKK".into(),
                school: None,
            }
        );
    }

    #[test]
    fn empty_segments_are_ignored() {
        let c = match_line("Budi -- 11 - AKC -").unwrap();
        assert_eq!(c.name, "Budi");
        assert_eq!(c.grade, "11");
        assert_eq!(c.track, "AKC");
        assert_eq!(c.school, None);
    }

    #[test]
    fn segment_count_outside_three_or_four() {
        assert_eq!(match_line("Budi - 11"), None);
        assert_eq!(match_line("a - b - c - d - e"), None);
        assert_eq!(match_line("Budi kelas 11 AKC"), None);
    }
}
