pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod model;
pub mod outcome;
pub mod recorder;
pub mod refresh;
pub mod report;
pub mod service;
pub mod telemetry;
pub mod temporal;

pub use classifier::{classify, label, label_in, LabelLocale, StatusClassifier};
pub use config::{load_settings, save_settings, Role, Settings};
pub use dashboard::{AttendanceDashboard, ClassDayReport, Overview};
pub use error::{
    AbsensiError, ConfigError, Failure, Result, ServiceError, ValidationError,
};
pub use filter::{filter, RecordFilter};
pub use ingest::{ingest, normalize_row, IngestContext, IngestReport, RawAttendanceRow};
pub use model::{AttendanceEntry, AttendanceRecord, AttendeeType, CanonicalStatus, RecordSource};
pub use outcome::{Outcome, OutcomeChannel};
pub use recorder::{BulkBatch, BulkRecorder};
pub use refresh::RefreshTimer;
pub use report::{
    count_by_status, follow_up_board, percentages, score, FollowUpEntry, FollowUpFlag,
    FollowUpLabel, FollowUpScorer, StatusCounts, StatusFractions,
};
pub use service::{AttendanceService, RawStatusSummary};
pub use temporal::{normalize, CanonicalDate, Moment};
