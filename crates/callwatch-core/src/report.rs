use crate::cell::StatCell;
use crate::identity::OperationIdentity;
use crate::table::TableView;

/// Fixed report header. `rt` is mean latency in milliseconds, `fail-rate`
/// a percentage; both render with two decimal digits.
pub const REPORT_HEADER: [&str; 8] = [
    "timestamp",
    "class",
    "behavior",
    "total",
    "success",
    "fail",
    "rt",
    "fail-rate",
];

/// One operation identity's statistics for one reporting interval.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub identity: OperationIdentity,
    pub cell: StatCell,
}

/// Render one interval's report. All rows share the one timestamp captured
/// for the tick; rows are independent records, so their order carries no
/// meaning.
pub fn render_report(timestamp: &str, rows: &[ReportRow]) -> String {
    let mut table = TableView::new(REPORT_HEADER.len()).with_padding(1).with_border(true);
    table.add_row(REPORT_HEADER.iter().map(|cell| cell.to_string()).collect());
    for row in rows {
        table.add_row(vec![
            timestamp.to_string(),
            row.identity.class_name.clone(),
            row.identity.method_name.clone(),
            row.cell.total.to_string(),
            row.cell.success.to_string(),
            row.cell.failed.to_string(),
            format!("{:.2}", row.cell.avg_latency_ms()),
            format!("{:.2}", row.cell.fail_rate()),
        ]);
    }
    table.draw()
}
