mod engine;
mod error;
mod intensity;
mod position;
mod report;

pub use engine::{TrackerEngine, TrackerSettings};
pub use error::SourceError;
pub use intensity::IntensityMapper;
pub use position::{OpenNotifyPositionSource, PositionSource};
pub use report::{
    HttpReportSink, LatestReport, LogReportSink, ReportFanout, ReportSink, VisibilityReport,
};

#[cfg(test)]
pub(crate) use report::tests::sample_report;
