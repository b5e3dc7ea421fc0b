use crate::group::Tree;

use std::fmt::Write;

/// Indented outline, one node per line, counts in parentheses.
///
/// School (n)
///   Track PPLG (n)
///     Grade 11 (n)
///       1. Name
pub fn render_text_tree(tree: &Tree) -> String {
    let mut out = String::new();
    for school in &tree.schools {
        let _ = writeln!(out, "{} ({})", school.school, school.count);
        for track in &school.tracks {
            let _ = writeln!(out, "  Track {} ({})", track.track, track.count);
            for grade in &track.grades {
                let _ = writeln!(out, "    Grade {} ({})", grade.grade, grade.count);
                for (i, r) in grade.records.iter().enumerate() {
                    let _ = writeln!(out, "      {}. {}", i + 1, r.name);
                }
            }
        }
    }
    let _ = write!(out, "Total students: {}", tree.count);
    let per_school: Vec<String> = tree
        .school_counts()
        .into_iter()
        .map(|(school, n)| format!("{}: {}", school, n))
        .collect();
    if !per_school.is_empty() {
        let _ = write!(out, " ({})", per_school.join(" | "));
    }
    out.push('\n');
    out
}
