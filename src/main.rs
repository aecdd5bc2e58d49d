use std::sync::Arc;

use iced::Application;
use phoenix_scan_console::client::config::ClientConfig;
use phoenix_scan_console::client::gui::app::{ConsoleFlags, ScanConsoleApp};
use phoenix_scan_console::client::services::scan_api::HttpScanBackend;

fn main() -> anyhow::Result<()> {
    // load environment from .env (optional)
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = ClientConfig::from_env();
    let backend = HttpScanBackend::new(&config)?;
    let flags = ConsoleFlags {
        config,
        backend: Arc::new(backend),
        initial_file: std::env::args().nth(1),
    };

    let mut settings = iced::Settings::with_flags(flags);
    settings.window.size = iced::Size::new(1040.0, 860.0);
    ScanConsoleApp::run(settings)?;
    Ok(())
}
