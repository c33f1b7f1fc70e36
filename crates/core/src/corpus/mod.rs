pub mod catalog;
pub mod naming;
pub mod planner;
pub mod schedule;
pub mod synthesize;
