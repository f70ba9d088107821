//! Raw catalog records and the pure functions that produce them.
//!
//! A catalog file holds one course per line:
//!
//! ```text
//! CSCI300,Introduction to Algorithms,CSCI200,MATH201
//! ```
//!
//! Field 0 is the course number, field 1 the name, the rest prerequisites.

/// Characters stripped from both ends of every field.
const FIELD_TRIM: &[char] = &[' ', '\t', '\r', '\n'];

/// One unvalidated line of a catalog, split into trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the source
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRecord {
    pub fn new<I, S>(line: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Split a line on `delimiter` and trim each field.
///
/// An empty segment after a trailing delimiter is not a field:
/// `"CS101,"` yields one field, `"CS101, "` yields two.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut segments: Vec<&str> = line.split(delimiter).collect();
    if segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
        .into_iter()
        .map(|s| s.trim_matches(FIELD_TRIM).to_string())
        .collect()
}

/// Turn catalog text into numbered raw records.
///
/// Empty lines are skipped but still count towards line numbers, so
/// diagnostics point at the right line of the file. A line holding only
/// whitespace is not empty: it becomes a record with one empty field.
pub fn parse_records(content: &str, delimiter: char) -> Vec<RawRecord> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| RawRecord {
            line: idx + 1,
            fields: split_fields(line, delimiter),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CS101,Intro", vec!["CS101", "Intro"])]
    #[case("  CS101 ,\tIntro\t, CS100 ", vec!["CS101", "Intro", "CS100"])]
    #[case("CS101,Intro,,CS100", vec!["CS101", "Intro", "", "CS100"])]
    #[case("CS101,", vec!["CS101"])]
    #[case("CS101, ", vec!["CS101", ""])]
    #[case("CS101,Intro\r", vec!["CS101", "Intro"])]
    fn given_line_when_splitting_then_fields_are_trimmed(
        #[case] line: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(split_fields(line, ','), expected);
    }

    #[test]
    fn given_empty_lines_when_parsing_then_skipped_but_counted() {
        // Arrange
        let content = "CS101,Intro\n\n\r\nCS201,Data Structures,CS101\n";

        // Act
        let records = parse_records(content, ',');

        // Assert
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].line, 4);
        assert_eq!(records[1].fields, ["CS201", "Data Structures", "CS101"]);
    }

    #[rstest]
    #[case("   ")]
    #[case(" \t")]
    fn given_whitespace_only_line_when_parsing_then_kept_as_single_empty_field(
        #[case] blank: &str,
    ) {
        let content = format!("CS101,Intro\n{}\nCS201,DS\n", blank);

        let records = parse_records(&content, ',');

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].line, 2);
        assert_eq!(records[1].fields, [""]);
    }

    #[test]
    fn given_custom_delimiter_when_parsing_then_splits_on_it() {
        let records = parse_records("CS101;Intro;CS100", ';');
        assert_eq!(records[0].fields, ["CS101", "Intro", "CS100"]);
    }
}
