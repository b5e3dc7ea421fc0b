//! Flat-file format: one student per line, `name,grade,track,school`.
//!
//! Fields containing a comma, quote, CR or LF are wrapped in double quotes with
//! inner quotes doubled; everything else is written bare. Quoted fields may
//! span lines, so `decode(encode(x))` returns the original fields exactly.

use crate::Result;
use crate::record::{RawFields, Record};

use anyhow::{Context, anyhow};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

pub const FIELDS: usize = 4;

pub fn encode(records: &[Record]) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    for r in records {
        wtr.write_record([&r.name, &r.grade, &r.track, &r.school])
            .with_context(|| format!("encode record {:?}", r.name))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("flush flat-file writer: {}", e.error()))?;
    String::from_utf8(bytes).context("flat-file output is not UTF-8")
}

/// Decode every well-formed line. Lines with fewer than four fields are
/// skipped; extra fields are ignored.
pub fn decode(text: &str) -> Vec<RawFields> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::debug!(record = idx + 1, %err, "skipping unreadable line");
                continue;
            }
        };
        if row.len() < FIELDS {
            tracing::debug!(
                record = idx + 1,
                fields = row.len(),
                "skipping line with too few fields"
            );
            continue;
        }
        out.push(RawFields {
            name: row[0].to_string(),
            grade: row[1].to_string(),
            track: row[2].to_string(),
            school: row[3].to_string(),
        });
    }
    out
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

    #[test]
    fn plain_fields_are_bare() {
        let text = encode(&[rec("Rina Safitri", "11", "PPLG", "SMK Airlangga")]).unwrap();
        assert_eq!(text, "Rina Safitri,11,PPLG,SMK Airlangga\n");
    }

    #[test]
    fn comma_and_quote_are_escaped() {
        let text = encode(&[rec("Doe, \"Jr\"", "10", "AKL", "SMK Airlangga")]).unwrap();
        assert_eq!(text, "\"Doe, \"\"Jr\"\"\",10,AKL,SMK Airlangga\n");

        let back = decode(&text);
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].name, "Doe, \"Jr\"");
    }

    #[test]
    fn awkward_fields_round_trip() {
        let records = vec![
            rec("Doe, \"Jr\"", "10", "AKL", "SMK Airlangga"),
            rec("line\nbreak", "11", "TLM", "SMK, Kesehatan"),
            rec("cr\r\nlf", "12", "X\"Y", "Unknown"),
            rec(" padded ", "", "DKV", "SMK Airlangga"),
        ];
        let decoded = decode(&encode(&records).unwrap());
        let expected: Vec<RawFields> = records.iter().map(RawFields::from).collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn short_lines_are_skipped() {
        let text = "Budi,10,AKC,SMK Kesehatan Airlangga\nonly,three,fields\n\nMaya,10,FKK,SMK Kesehatan Airlangga,extra\n";
        let rows = decode(text);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Maya"]);
        assert_eq!(rows[1].school, "SMK Kesehatan Airlangga");
    }

    #[test]
    fn stray_quote_inside_bare_field_is_literal() {
        // Only a quote that opens a field starts quoted mode.
        let rows = decode("ab\"c,d\"e,f,g\n");
        assert_eq!(
            rows,
            vec![RawFields {
                name: "ab\"c".into(),
                grade: "d\"e".into(),
                track: "f".into(),
                school: "g".into(),
            }]
        );
    }

    #[test]
    fn reads_crlf_files() {
        let rows = decode("Budi,10,AKC,S\r\nMaya,11,FKK,S\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].grade, "11");
        assert_eq!(rows[1].school, "S");
    }
}
