pub mod scan_api;
pub mod scan_console;
pub mod scheduler;
pub mod session;
