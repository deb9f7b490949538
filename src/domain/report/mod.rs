//! Report domain module.
//!
//! The risk report assembled for a completed submission, the document shape
//! it is persisted as, and the profile read model built back from storage.

mod profile;
mod record;
mod risk_report;

pub use profile::ProfileView;
pub use record::{AssessmentRecord, Dataset, GraphData, HealthTest, InsightData, CHART_DATASET_LABEL};
pub use risk_report::{
    chart_from, format_insights_for_display, ChartPoint, Diagnostics, InsightSource, ReportParts,
    RiskReport,
};
