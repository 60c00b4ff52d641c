// Amateur Football League - Core
//
// Match event ledger and standings engine for an amateur football league.
// Architecture follows domain-driven design: each domain owns its models
// (SQL), activities (operations) and data (read views); the kernel holds the
// storage seam and dependency wiring.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
