pub mod app_state;
pub mod messages;
pub mod report;
