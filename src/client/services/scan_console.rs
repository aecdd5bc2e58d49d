use crate::client::config::ClientConfig;
use crate::client::error::ScanError;
use crate::client::models::report::ScanReport;
use crate::client::services::scan_api::ScanBackend;
use crate::client::services::scheduler::{DebounceToken, Debouncer};
use crate::client::services::session::{ScanSession, ScanTicket};
use crate::common::models::{Language, ScanInput, ScanRequest, ScanResult};

pub const WAKING_UP_STATUS: &str = "⏳ Waking up backend… first scan may take up to 60 seconds.";
pub const SCAN_LABEL: &str = "🔍 Scan Code";
pub const SCANNING_LABEL: &str = "⏳ Scanning…";

/// Everything the controller is allowed to do to the screen.
pub trait ScanView {
    fn reset_results(&mut self);
    fn show_status(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
    fn shake_input(&mut self);
    fn set_scan_enabled(&mut self, enabled: bool);
    fn render_result(&mut self, report: &ScanReport);
}

/// A scan that passed the guard and is ready to hit the network.
#[derive(Debug, Clone)]
pub struct PendingScan {
    ticket: ScanTicket,
    input: ScanInput,
}

impl PendingScan {
    /// Issue exactly one network call for this scan.
    pub async fn execute(self, backend: &dyn ScanBackend) -> ScanOutcome {
        let result = match &self.input {
            ScanInput::Code { code, language } => {
                let request = ScanRequest::new(code.as_str(), *language);
                backend.scan_code(&request).await
            }
            ScanInput::File { path } => backend.scan_file(path).await,
        };
        ScanOutcome {
            ticket: self.ticket,
            source: self.input.source_text().map(str::to_string),
            result,
        }
    }
}

/// The settled result of one [`PendingScan`].
#[derive(Debug)]
pub struct ScanOutcome {
    pub ticket: ScanTicket,
    pub source: Option<String>,
    pub result: Result<ScanResult, ScanError>,
}

/// Page-level controller: the scan button and the auto-detect side channel.
#[derive(Debug)]
pub struct ScanConsole {
    session: ScanSession,
    detect: Debouncer,
    min_detect_chars: usize,
}

impl ScanConsole {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            session: ScanSession::new(),
            detect: Debouncer::new(),
            min_detect_chars: config.auto_detect_min_chars,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.session.in_progress()
    }

    /// Guard, reset and lock the UI. Returns `None` when nothing should be sent.
    pub fn begin_scan(&mut self, input: Option<ScanInput>, view: &mut dyn ScanView) -> Option<PendingScan> {
        if self.session.in_progress() {
            log::debug!("Scan requested while scan #{} is running; ignored", self.session.current_id());
            return None;
        }

        let Some(input) = input else {
            view.shake_input();
            return None;
        };

        let ticket = self.session.try_begin()?;
        log::info!("Starting scan #{}", ticket.id());

        view.reset_results();
        view.show_status(WAKING_UP_STATUS);
        view.set_scan_enabled(false);

        Some(PendingScan { ticket, input })
    }

    /// Release the guard and render, unless a newer scan made this one stale.
    pub fn complete_scan(&mut self, outcome: &ScanOutcome, view: &mut dyn ScanView) {
        self.session.finish(outcome.ticket);
        view.set_scan_enabled(true);

        if self.session.is_stale(outcome.ticket) {
            log::debug!("Dropping stale response for scan #{}", outcome.ticket.id());
            return;
        }

        match &outcome.result {
            Ok(result) => {
                log::info!(
                    "Scan #{} finished: {} ({}), {} warning(s)",
                    outcome.ticket.id(),
                    result.risk_level,
                    result.risk_score,
                    result.warnings.len()
                );
                let report = ScanReport::build(result, outcome.source.as_deref());
                view.render_result(&report);
            }
            Err(e) => {
                log::warn!("Scan #{} failed: {}", outcome.ticket.id(), e);
                view.show_error(&e.user_message());
            }
        }
    }

    /// Begin, execute and complete in one go. Returns the outcome when a request was sent.
    pub async fn run_scan(
        &mut self,
        backend: &dyn ScanBackend,
        input: Option<ScanInput>,
        view: &mut dyn ScanView,
    ) -> Option<ScanOutcome> {
        let pending = self.begin_scan(input, view)?;
        let outcome = pending.execute(backend).await;
        self.complete_scan(&outcome, view);
        Some(outcome)
    }

    /// Empty the result panel and discard whatever is still in flight.
    pub fn clear(&mut self, view: &mut dyn ScanView) {
        self.session.invalidate();
        self.detect.cancel();
        view.reset_results();
    }

    /// Auto-detect only runs on pasted code long enough to say something about.
    pub fn should_detect(&self, code: &str, has_file: bool) -> bool {
        !has_file && code.trim().chars().count() >= self.min_detect_chars
    }

    /// Restart the auto-detect timer; earlier timers become no-ops.
    pub fn schedule_detect(&mut self) -> DebounceToken {
        self.detect.schedule()
    }

    pub fn is_detect_current(&self, token: DebounceToken) -> bool {
        self.detect.is_current(token)
    }

    /// A preview answer only counts if nothing superseded its request in the
    /// meantime: no newer edit, no clear, and no file picked since.
    pub fn accepts_detection(&self, token: DebounceToken, has_file: bool) -> bool {
        !has_file && self.detect.is_current(token)
    }
}

/// Ask the backend which language `code` is. Failures never reach the user.
pub async fn detect_language(backend: &dyn ScanBackend, code: &str) -> Option<Language> {
    match backend.detect_language(code).await {
        Ok(Some(name)) => {
            let lang = Language::from_backend(&name);
            if lang.is_none() {
                log::debug!("Auto-detect returned unsupported language {:?}", name);
            }
            lang
        }
        Ok(None) => None,
        Err(e) => {
            log::debug!("Auto-detect failed: {}", e);
            None
        }
    }
}

/// New selector value, or `None` when the detection changes nothing.
pub fn apply_detection(current: Language, detected: Option<Language>) -> Option<Language> {
    match detected {
        Some(lang) if lang != current => Some(lang),
        _ => None,
    }
}
