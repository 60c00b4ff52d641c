// Business domains
pub mod audit;
pub mod competition;
pub mod matches;
pub mod standings;
