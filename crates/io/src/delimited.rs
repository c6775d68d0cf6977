// CSV/TSV parsing for uploads

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use gridpad_engine::{ParsedFile, ParsedTable, Scalar};

use crate::upload::FileKind;
use crate::IngestError;

/// Name of the single table a delimited file produces.
pub const DELIMITED_TABLE_NAME: &str = "Sheet1";

/// Longest leading decimal literal, the way a browser's `parseFloat` reads one.
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float prefix pattern is valid")
});

/// Parse CSV/TSV bytes into a one-table `ParsedFile`.
///
/// The delimiter is a tab for `.tsv` names and a comma otherwise. Blank lines
/// are dropped; fields are split without quote handling and coerced with
/// [`coerce_field`].
pub fn parse_delimited(bytes: &[u8], file_name: &str) -> Result<ParsedFile, IngestError> {
    let delimiter = FileKind::from_name(file_name)
        .map(|k| k.delimiter())
        .unwrap_or(b',');
    let text = decode_text(bytes);
    let rows = parse_rows(&text, delimiter).map_err(|e| IngestError::ParseFailure {
        file: file_name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(ParsedFile::new(
        file_name,
        vec![ParsedTable::new(DELIMITED_TABLE_NAME, rows)],
    ))
}

fn parse_rows(text: &str, delimiter: u8) -> Result<Vec<Vec<Scalar>>, csv::Error> {
    let content: Vec<&str> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    let content = content.join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(coerce_field).collect());
    }
    Ok(rows)
}

/// Turn one raw field into a scalar.
///
/// Surrounding whitespace is trimmed and one leading and one trailing `"` are
/// stripped independently. If the rest starts with a decimal literal the
/// field is that number (`"07"` is 7, `"12px"` is 12); otherwise it stays text
/// (`"NaN"` stays text).
pub fn coerce_field(raw: &str) -> Scalar {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    match parse_float_prefix(unquoted) {
        Some(n) => Scalar::Number(n),
        None => Scalar::Text(unquoted.to_string()),
    }
}

/// Number read from the start of `s`, ignoring leading whitespace and trailing junk.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let m = FLOAT_PREFIX.find(s.trim_start())?;
    m.as_str().parse::<f64>().ok()
}

/// Decode file bytes as UTF-8, falling back to Windows-1252 (common for
/// Excel-exported CSVs). A UTF-8 byte-order mark is dropped.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s.strip_prefix('\u{feff}').unwrap_or(s)),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    fn num(n: f64) -> Scalar {
        Scalar::Number(n)
    }

    fn rows_of(file: &ParsedFile) -> &Vec<Vec<Scalar>> {
        &file.tables[0].rows
    }

    #[test]
    fn test_coercion_example() {
        let file = parse_delimited(b"Name,Age\nJohn,30\n\"07\",NaN", "people.csv").unwrap();
        assert_eq!(file.source_name, "people.csv");
        assert_eq!(file.tables.len(), 1);
        assert_eq!(file.tables[0].name, "Sheet1");
        assert_eq!(
            rows_of(&file),
            &vec![
                vec![text("Name"), text("Age")],
                vec![text("John"), num(30.0)],
                vec![num(7.0), text("NaN")],
            ]
        );
    }

    #[test]
    fn test_tsv_uses_tab() {
        let file = parse_delimited(b"a\tb,c\n1\t2", "data.tsv").unwrap();
        assert_eq!(
            rows_of(&file),
            &vec![vec![text("a"), text("b,c")], vec![num(1.0), num(2.0)]]
        );
    }

    #[test]
    fn test_blank_lines_dropped() {
        let file = parse_delimited(b"a,b\n\n   \n\t\nc,d\n", "x.csv").unwrap();
        assert_eq!(rows_of(&file).len(), 2);
    }

    #[test]
    fn test_crlf_lines() {
        let file = parse_delimited(b"a,b\r\n1,2\r\n", "x.csv").unwrap();
        assert_eq!(
            rows_of(&file),
            &vec![vec![text("a"), text("b")], vec![num(1.0), num(2.0)]]
        );
    }

    #[test]
    fn test_quotes_do_not_group_fields() {
        let file = parse_delimited(b"\"Doe, Jane\",x", "x.csv").unwrap();
        assert_eq!(rows_of(&file), &vec![vec![text("Doe"), text("Jane"), text("x")]]);
    }

    #[test]
    fn test_ragged_rows_kept() {
        let file = parse_delimited(b"a,b,c\nd\n", "x.csv").unwrap();
        assert_eq!(rows_of(&file)[0].len(), 3);
        assert_eq!(rows_of(&file)[1].len(), 1);
    }

    #[test]
    fn test_coerce_field_quotes() {
        assert_eq!(coerce_field("  \"hello\"  "), text("hello"));
        assert_eq!(coerce_field("\"open"), text("open"));
        assert_eq!(coerce_field("close\""), text("close"));
        assert_eq!(coerce_field("\"\"x\"\""), text("\"x\""));
        assert_eq!(coerce_field("\""), text(""));
        assert_eq!(coerce_field(""), text(""));
    }

    #[test]
    fn test_coerce_field_numbers() {
        assert_eq!(coerce_field("30"), num(30.0));
        assert_eq!(coerce_field("-2.5"), num(-2.5));
        assert_eq!(coerce_field("+4"), num(4.0));
        assert_eq!(coerce_field(".5"), num(0.5));
        assert_eq!(coerce_field("5."), num(5.0));
        assert_eq!(coerce_field("1e3"), num(1000.0));
        assert_eq!(coerce_field("\"42\""), num(42.0));
        assert_eq!(coerce_field("Infinity"), num(f64::INFINITY));
        assert_eq!(coerce_field("-Infinity"), num(f64::NEG_INFINITY));
    }

    #[test]
    fn test_coerce_field_prefix_numbers() {
        assert_eq!(coerce_field("12px"), num(12.0));
        assert_eq!(coerce_field("2024-01-15"), num(2024.0));
        assert_eq!(coerce_field("3e"), num(3.0));
        assert_eq!(coerce_field("0x10"), num(0.0));
    }

    #[test]
    fn test_coerce_field_text() {
        assert_eq!(coerce_field("NaN"), text("NaN"));
        assert_eq!(coerce_field("inf"), text("inf"));
        assert_eq!(coerce_field("."), text("."));
        assert_eq!(coerce_field("-"), text("-"));
        assert_eq!(coerce_field("e5"), text("e5"));
        assert_eq!(coerce_field("abc123"), text("abc123"));
        assert_eq!(coerce_field("١٢"), text("١٢"));
    }

    #[test]
    fn test_special_numbers_survive_display() {
        let file = parse_delimited(b"Infinity,-Infinity,-0,1e21", "x.csv").unwrap();
        let shown: Vec<String> = rows_of(&file)[0].iter().map(|v| v.to_string()).collect();
        assert_eq!(shown, vec!["Infinity", "-Infinity", "0", "1e+21"]);

        for (value, text) in rows_of(&file)[0].iter().zip(&shown) {
            assert_eq!(&coerce_field(text), value);
        }
    }

    #[test]
    fn test_parse_float_prefix_leading_space() {
        assert_eq!(parse_float_prefix("  7 apples"), Some(7.0));
        assert_eq!(parse_float_prefix("apples"), None);
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "Café,1" with é as 0xE9
        let file = parse_delimited(b"Caf\xe9,1", "latin.csv").unwrap();
        assert_eq!(rows_of(&file), &vec![vec![text("Café"), num(1.0)]]);
    }

    #[test]
    fn test_bom_stripped() {
        let file = parse_delimited("\u{feff}id,name".as_bytes(), "bom.csv").unwrap();
        assert_eq!(rows_of(&file)[0][0], text("id"));
    }

    #[test]
    fn test_empty_file() {
        let file = parse_delimited(b"", "empty.csv").unwrap();
        assert_eq!(file.tables.len(), 1);
        assert!(rows_of(&file).is_empty());
    }
}
