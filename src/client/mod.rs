pub mod config;
pub mod error;
pub mod formatters;
pub mod gui;
pub mod models;
pub mod services;
