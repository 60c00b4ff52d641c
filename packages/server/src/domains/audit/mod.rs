pub mod activities;
pub mod data;
pub mod models;

pub use data::AuditLogView;
pub use models::{AuditAction, AuditLogEntry, NewAuditEntry, User};
