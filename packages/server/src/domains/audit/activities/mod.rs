pub mod queries;

pub use queries::{match_audit_log, recent_audit_log, DEFAULT_AUDIT_LIMIT};
