//! Comma-separated record codec.
//!
//! Fields are separated by `,`. A field starting with `"` is quoted: it may
//! contain commas and line breaks, and `""` inside it stands for one quote.
//! Lines may end in `\n` or `\r\n`. Blank lines are skipped.

/// One parsed record and the line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number of the record's first character.
    pub line: usize,
    /// Field values with quoting removed.
    pub fields: Vec<String>,
}

/// Parse failure: a quoted field was never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnterminatedQuote {
    /// 1-based line the unterminated record starts on.
    pub line: usize,
}

#[derive(Default)]
struct RecordBuilder {
    fields: Vec<String>,
    field: String,
    quoted: bool,
}

impl RecordBuilder {
    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
    }

    fn finish(&mut self, line: usize, records: &mut Vec<Record>) {
        let blank = self.fields.is_empty() && !self.quoted && self.field.trim().is_empty();
        if blank {
            self.field.clear();
        } else {
            self.end_field();
            records.push(Record {
                line,
                fields: std::mem::take(&mut self.fields),
            });
        }
        self.quoted = false;
    }
}

/// Split text into records.
pub fn parse(text: &str) -> Result<Vec<Record>, UnterminatedQuote> {
    let mut records = Vec::new();
    let mut builder = RecordBuilder::default();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    builder.field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    builder.field.push('\n');
                }
                _ => builder.field.push(c),
            }
            continue;
        }

        match c {
            '"' if builder.field.is_empty() => {
                in_quotes = true;
                builder.quoted = true;
            }
            ',' => builder.end_field(),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                builder.finish(record_line, &mut records);
                line += 1;
                record_line = line;
            }
            _ => builder.field.push(c),
        }
    }

    if in_quotes {
        return Err(UnterminatedQuote { line: record_line });
    }
    builder.finish(record_line, &mut records);
    Ok(records)
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\r', '\n'])
}

/// Append one record, terminated by `\n`, to `out`.
pub fn write<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let field = field.as_ref();
        if needs_quotes(field) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(records: &[Record]) -> Vec<Vec<&str>> {
        records
            .iter()
            .map(|r| r.fields.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn plain_records() {
        let records = parse("1,Doe,Jane,0,0,0\n2,Roe,Rick,3,1,2\n").unwrap();
        assert_eq!(
            fields(&records),
            vec![
                vec!["1", "Doe", "Jane", "0", "0", "0"],
                vec!["2", "Roe", "Rick", "3", "1", "2"],
            ]
        );
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        let records = parse("1,a,b\r\n2,c,d").unwrap();
        assert_eq!(fields(&records), vec![vec!["1", "a", "b"], vec!["2", "c", "d"]]);
    }

    #[test]
    fn blank_lines_skipped() {
        let records = parse("\n1,a\n   \n\n2,b\n\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 5);
    }

    #[test]
    fn quoted_fields() {
        let records = parse("1,\"O\"\"Brien, Jr.\",\"Pat\"\n").unwrap();
        assert_eq!(fields(&records), vec![vec!["1", "O\"Brien, Jr.", "Pat"]]);
    }

    #[test]
    fn quoted_newline_spans_lines() {
        let records = parse("1,\"two\nlines\",x\n2,y,z\n").unwrap();
        assert_eq!(records[0].fields[1], "two\nlines");
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn empty_fields_kept() {
        let records = parse("1,,\n").unwrap();
        assert_eq!(fields(&records), vec![vec!["1", "", ""]]);
    }

    #[test]
    fn unterminated_quote() {
        let err = parse("1,a\n2,\"open\n").unwrap_err();
        assert_eq!(err, UnterminatedQuote { line: 2 });
    }

    #[test]
    fn write_quotes_only_when_needed() {
        let mut out = String::new();
        write(&mut out, &["3", "Smith, Jr.", "Say \"hi\"", "plain"]);
        assert_eq!(out, "3,\"Smith, Jr.\",\"Say \"\"hi\"\"\",plain\n");
    }

    #[test]
    fn written_records_parse_back() {
        let original = vec!["7", "van der Berg", "A,B", "line\nbreak", "", "\"q\""];
        let mut out = String::new();
        write(&mut out, &original);
        let records = parse(&out).unwrap();
        assert_eq!(fields(&records), vec![original]);
    }
}
