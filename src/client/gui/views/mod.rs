pub mod console;
pub mod logger;
