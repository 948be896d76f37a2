// ==========================================
// Roteiro PCP - report layer
// ==========================================
// Responsibility: render routed batches for the shop floor
// Red line: no routing decisions here, values come from the batch
// ==========================================

pub mod csv_report;

// Re-exports
pub use csv_report::{
    render_legend, render_report, report_headers, ReportError, ReportResult, ROUTE_COLUMN,
};
