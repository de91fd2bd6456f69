//! CSV export

use super::ROW_TIMESTAMP_FORMAT;
use crate::record::ClassificationRecord;
use chrono::NaiveDateTime;

const HEADERS: [&str; 5] = ["Original Task", "Summary", "Tags", "Priority", "Processed Date"];

/// Render records as an RFC 4180 table with a header row
pub fn render(records: &[ClassificationRecord], now: &NaiveDateTime) -> String {
    let stamp = now.format(ROW_TIMESTAMP_FORMAT).to_string();
    let mut out = String::new();

    push_row(&mut out, &HEADERS);
    for record in records {
        push_row(
            &mut out,
            &[
                &record.original,
                &record.summary,
                &record.tags_text(),
                &record.priority.to_string(),
                &stamp,
            ],
        );
    }
    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| quote(f)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Quote a field only when it contains a delimiter, quote or line break
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocabulary::Tag;
    use crate::record::Priority;
    use chrono::NaiveDate;

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("a, b"), "\"a, b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_render() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap();
        let records = vec![ClassificationRecord {
            original: "fix the login bug asap".into(),
            summary: "fix the login bug asap".into(),
            tags: vec![Tag::Bug, Tag::Urgent],
            priority: Priority::MAX,
        }];

        let csv = render(&records, &now);
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[0], "Original Task,Summary,Tags,Priority,Processed Date");
        assert_eq!(
            lines[1],
            "fix the login bug asap,fix the login bug asap,\"#bug, #urgent\",5,2024-03-05 14:07:09"
        );
        assert_eq!(lines[2], "");
    }
}
