//! Shared test utilities for absensi integration tests.
//!
//! - Builders for records, raw rows and manual entries
//! - `FakeService`, a scripted `AttendanceService` that records its calls

pub mod builders;
pub mod fake_service;

pub use builders::*;
pub use fake_service::FakeService;
