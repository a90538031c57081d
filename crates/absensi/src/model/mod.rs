pub mod entry;
pub mod record;
pub mod status;

pub use entry::AttendanceEntry;
pub use record::{AttendanceRecord, AttendeeType, RecordParts, RecordSource};
pub use status::CanonicalStatus;
