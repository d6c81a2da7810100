pub mod dashboard;
pub mod help;
