/// Handle for one started scan. Only the session can mint these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket {
    id: u64,
}

impl ScanTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Re-entrancy guard plus the latest scan id.
#[derive(Debug, Default)]
pub struct ScanSession {
    in_progress: bool,
    current_id: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn current_id(&self) -> u64 {
        self.current_id
    }

    /// Start a scan. Returns `None` while another scan is in flight.
    pub fn try_begin(&mut self) -> Option<ScanTicket> {
        if self.in_progress {
            return None;
        }
        self.in_progress = true;
        self.current_id += 1;
        Some(ScanTicket { id: self.current_id })
    }

    /// True when a newer scan (or a clear) happened after `ticket` was issued.
    pub fn is_stale(&self, ticket: ScanTicket) -> bool {
        ticket.id != self.current_id
    }

    /// Release the guard. Called on every exit path, stale or not.
    pub fn finish(&mut self, ticket: ScanTicket) {
        if ticket.id > self.current_id {
            log::warn!("finish() for unknown scan #{}", ticket.id);
        }
        self.in_progress = false;
    }

    /// Make any in-flight response stale without starting a new scan.
    pub fn invalidate(&mut self) {
        self.current_id += 1;
    }
}
