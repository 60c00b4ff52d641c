pub mod audit_log;
pub mod user;

pub use audit_log::{AuditAction, AuditLogEntry, NewAuditEntry, UNKNOWN_PLAYER};
pub use user::User;
