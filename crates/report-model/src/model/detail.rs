use crate::model::field::ReportField;
use crate::model::message::{Event, Message};

/// One row of a report-detail view, tagged with the kind of content it
/// carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub field: ReportField,
    pub label: String,
}

/// Flattens a message into detail rows, in [`ReportField`] code order.
///
/// The severity and detection-status labels are attached per report by
/// the surrounding product; rows for them only appear when a label is
/// given. Groups with no items (steps, macro expansions, notes)
/// produce no rows at all.
pub fn detail_rows(
    message: &Message,
    severity: Option<&str>,
    detection_status: Option<&str>,
) -> Vec<DetailRow> {
    let mut rows = Vec::new();
    if let Some(severity) = severity {
        rows.push(DetailRow {
            field: ReportField::SeverityLevel,
            label: severity.to_string(),
        });
    }
    if let Some(detection_status) = detection_status {
        rows.push(DetailRow {
            field: ReportField::DetectionStatus,
            label: detection_status.to_string(),
        });
    }
    rows.push(DetailRow {
        field: ReportField::Report,
        label: message.to_string(),
    });
    push_group(
        &mut rows,
        ReportField::ReportSteps,
        ReportField::Bug,
        &message.events,
    );
    push_group(
        &mut rows,
        ReportField::MacroExpansion,
        ReportField::MacroExpansionItem,
        &message.macro_expansions,
    );
    push_group(
        &mut rows,
        ReportField::Note,
        ReportField::NoteItem,
        &message.notes,
    );
    rows
}

fn push_group(rows: &mut Vec<DetailRow>, header: ReportField, item: ReportField, items: &[Event]) {
    if items.is_empty() {
        return;
    }
    rows.push(DetailRow {
        field: header,
        label: format!("{} ({})", header, items.len()),
    });
    for event in items {
        rows.push(DetailRow {
            field: item,
            label: event.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn event(line: u32, message: &str) -> Event {
        Event {
            path: PathBuf::from("src/shop.c"),
            line,
            column: 0,
            message: message.to_string(),
        }
    }

    fn message() -> Message {
        Message {
            path: PathBuf::from("src/shop.c"),
            line: 42,
            column: 0,
            message: "division by zero".to_string(),
            checker: "core.DivideZero".to_string(),
            report_hash: Some("deadbeef".to_string()),
            events: vec![event(10, "assuming divisor is 0"), event(42, "dividing here")],
            notes: vec![event(5, "divisor comes from user input")],
            macro_expansions: vec![],
            fixits: vec![],
        }
    }

    #[test]
    fn test_rows_follow_field_order() {
        let rows = detail_rows(&message(), Some("high"), Some("new"));
        let fields: Vec<ReportField> = rows.iter().map(|r| r.field).collect();
        assert_eq!(
            fields,
            vec![
                ReportField::SeverityLevel,
                ReportField::DetectionStatus,
                ReportField::Report,
                ReportField::ReportSteps,
                ReportField::Bug,
                ReportField::Bug,
                ReportField::Note,
                ReportField::NoteItem,
            ]
        );
        assert_eq!(rows[0].label, "high");
        assert_eq!(rows[1].label, "new");
        assert_eq!(rows[3].label, "report_steps (2)");
        assert_eq!(rows[4].label, "src/shop.c:10:0: assuming divisor is 0");
    }

    #[test]
    fn test_empty_groups_produce_no_rows() {
        let mut bare = message();
        bare.events.clear();
        bare.notes.clear();
        let rows = detail_rows(&bare, None, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field, ReportField::Report);
        assert_eq!(
            rows[0].label,
            "src/shop.c:42:0: division by zero [core.DivideZero]"
        );
    }
}
