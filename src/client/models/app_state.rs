use crate::client::error::RETRY_HINT;
use crate::client::gui::views::logger::{LogLevel, LogMessage};
use crate::client::models::messages::Message;
use crate::client::models::report::{ScanReport, SCORE_TICK};
use crate::client::services::scan_console::{apply_detection, ScanView, SCANNING_LABEL, SCAN_LABEL};
use crate::client::services::scheduler::{DebounceToken, Debouncer};
use crate::common::models::{Language, ScanInput};
use iced::widget::text_editor;
use iced::Command;
use std::path::PathBuf;
use std::time::Duration;

/// Visual side effects requested by the controller that need a timer or a widget command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    Shake,
    Pulse,
    AnimateScore,
    ScrollToLine(usize),
}

pub const FLASH_DURATION: Duration = Duration::from_millis(1000);
pub const BADGE_VISIBLE: Duration = Duration::from_secs(4);
pub const BADGE_FADE: Duration = Duration::from_secs(1);

/// Timers started by an auto-detected language change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionTimers {
    pub flash: DebounceToken,
    pub badge: DebounceToken,
}

impl DetectionTimers {
    /// Delayed messages that end the flash, fade the badge and then remove it.
    pub fn timeline(&self) -> Vec<(Duration, Message)> {
        vec![
            (FLASH_DURATION, Message::FlashEnded(self.flash)),
            (BADGE_VISIBLE, Message::FadeDetectedBadge(self.badge)),
            (BADGE_VISIBLE + BADGE_FADE, Message::RemoveDetectedBadge(self.badge)),
        ]
    }
}

/// Transient "Detected: <lang>" badge next to the language selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedBadge {
    pub language: Language,
    pub fading: bool,
}

pub struct ConsoleState {
    pub editor: text_editor::Content,
    pub file_path: String,
    pub language: Language,
    pub scan_enabled: bool,
    pub scan_label: &'static str,
    pub logger: Vec<LogMessage>,
    pub result_visible: bool,
    pub report: Option<ScanReport>,
    pub displayed_score: u32,
    pub animation_id: u64,
    pub animation_elapsed: Duration,
    pub shaking: bool,
    pub pulsing: bool,
    pub language_flash: bool,
    pub detected_badge: Option<DetectedBadge>,
    pub badge_timer: Debouncer,
    pub flash_timer: Debouncer,
    pub shake_timer: Debouncer,
    pub pulse_timer: Debouncer,
    effects: Vec<UiEffect>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            editor: text_editor::Content::new(),
            file_path: String::new(),
            language: Language::Auto,
            scan_enabled: true,
            scan_label: SCAN_LABEL,
            logger: Vec::new(),
            result_visible: false,
            report: None,
            displayed_score: 0,
            animation_id: 0,
            animation_elapsed: Duration::ZERO,
            shaking: false,
            pulsing: false,
            language_flash: false,
            detected_badge: None,
            badge_timer: Debouncer::new(),
            flash_timer: Debouncer::new(),
            shake_timer: Debouncer::new(),
            pulse_timer: Debouncer::new(),
            effects: Vec::new(),
        }
    }
}

impl ConsoleState {
    pub fn code(&self) -> String {
        self.editor.text()
    }

    pub fn selected_file(&self) -> Option<PathBuf> {
        let trimmed = self.file_path.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    /// Current console input, file first.
    pub fn scan_input(&self) -> Option<ScanInput> {
        ScanInput::resolve(&self.code(), self.selected_file().as_ref(), self.language)
    }

    pub fn take_effects(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Advance the result animation by one frame: the score counts up and
    /// warnings whose delay has passed become visible. Returns false once both are settled.
    pub fn tick_score(&mut self) -> bool {
        let Some(report) = self.report.as_mut() else {
            return false;
        };
        self.animation_elapsed += SCORE_TICK;
        if !report.score.is_done() {
            self.displayed_score = report.score.advance();
        }
        let pending_warnings = report.warnings.iter().any(|w| w.delay > self.animation_elapsed);
        !report.score.is_done() || pending_warnings
    }

    /// Switch the selector to a detected language, flash it and show the badge.
    /// Returns `None` when the detection changes nothing.
    pub fn apply_detected_language(&mut self, detected: Option<Language>) -> Option<DetectionTimers> {
        let language = apply_detection(self.language, detected)?;
        log::info!("Auto-detected language: {}", language.as_str());
        self.language = language;
        self.language_flash = true;
        self.detected_badge = Some(DetectedBadge { language, fading: false });
        Some(DetectionTimers {
            flash: self.flash_timer.schedule(),
            badge: self.badge_timer.schedule(),
        })
    }

    /// Simple state changes that need no network access.
    pub fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::FilePathChanged(path) => {
                self.file_path = path;
            }
            Message::ClearFile => {
                self.file_path.clear();
            }
            Message::LanguageSelected(language) => {
                self.language = language;
            }
            Message::ShakeEnded(token) => {
                if self.shake_timer.is_current(token) {
                    self.shaking = false;
                }
            }
            Message::PulseEnded(token) => {
                if self.pulse_timer.is_current(token) {
                    self.pulsing = false;
                }
            }
            Message::FlashEnded(token) => {
                if self.flash_timer.is_current(token) {
                    self.language_flash = false;
                }
            }
            Message::FadeDetectedBadge(token) => {
                if self.badge_timer.is_current(token) {
                    if let Some(badge) = self.detected_badge.as_mut() {
                        badge.fading = true;
                    }
                }
            }
            Message::RemoveDetectedBadge(token) => {
                if self.badge_timer.is_current(token) {
                    self.detected_badge = None;
                }
            }
            _ => {}
        }
        Command::none()
    }
}

impl ScanView for ConsoleState {
    fn reset_results(&mut self) {
        self.result_visible = false;
        self.report = None;
        self.displayed_score = 0;
        self.animation_id += 1;
        self.animation_elapsed = Duration::ZERO;
        self.pulsing = false;
        self.logger.clear();
    }

    fn show_status(&mut self, message: &str) {
        self.logger.clear();
        self.logger.push(LogMessage {
            level: LogLevel::Info,
            message: message.to_string(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.logger.clear();
        self.logger.push(LogMessage {
            level: LogLevel::Error,
            message: format!("{}\n{}", message, RETRY_HINT),
        });
    }

    fn shake_input(&mut self) {
        self.shaking = true;
        self.effects.push(UiEffect::Shake);
    }

    fn set_scan_enabled(&mut self, enabled: bool) {
        self.scan_enabled = enabled;
        self.scan_label = if enabled { SCAN_LABEL } else { SCANNING_LABEL };
    }

    fn render_result(&mut self, report: &ScanReport) {
        self.logger.clear();
        self.result_visible = true;
        self.displayed_score = 0;
        self.animation_id += 1;
        self.animation_elapsed = Duration::ZERO;
        self.report = Some(report.clone());
        self.effects.push(UiEffect::AnimateScore);

        if report.pulse {
            self.pulsing = true;
            self.effects.push(UiEffect::Pulse);
        }
        if let Some(line) = report.preview.as_ref().and_then(|p| p.focus_line) {
            self.effects.push(UiEffect::ScrollToLine(line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::models::{ScanResult, Warning};

    fn critical_report() -> ScanReport {
        let result = ScanResult {
            risk_score: 90,
            risk_level: "CRITICAL".to_string(),
            language: None,
            warnings: vec![Warning {
                line: 1,
                code: "eval(x)".to_string(),
                category: "Code Injection".to_string(),
                explanation: "dynamic evaluation".to_string(),
                risk: "critical".to_string(),
            }],
        };
        ScanReport::build(&result, Some("eval(x)"))
    }

    #[test]
    fn render_queues_animation_pulse_and_scroll() {
        let mut state = ConsoleState::default();
        state.render_result(&critical_report());
        assert!(state.result_visible);
        assert!(state.pulsing);
        assert_eq!(
            state.take_effects(),
            vec![UiEffect::AnimateScore, UiEffect::Pulse, UiEffect::ScrollToLine(1)]
        );
        assert!(state.take_effects().is_empty());
    }

    #[test]
    fn score_ticks_until_target() {
        let mut state = ConsoleState::default();
        state.render_result(&critical_report());
        let mut ticks = 0;
        while state.tick_score() {
            ticks += 1;
        }
        assert_eq!(state.displayed_score, 90);
        assert!(ticks > 10);
    }

    #[test]
    fn error_includes_retry_hint_and_button_toggles_label() {
        let mut state = ConsoleState::default();
        state.set_scan_enabled(false);
        assert_eq!(state.scan_label, SCANNING_LABEL);
        state.show_error("Scan API failed");
        assert!(state.logger[0].message.contains(RETRY_HINT));
        state.set_scan_enabled(true);
        assert_eq!(state.scan_label, SCAN_LABEL);
    }

    #[test]
    fn outdated_badge_timer_keeps_newer_badge() {
        let mut state = ConsoleState::default();
        let old = state.badge_timer.schedule();
        state.detected_badge = Some(DetectedBadge { language: Language::Go, fading: false });
        let _newer = state.badge_timer.schedule();
        let _ = state.update(Message::RemoveDetectedBadge(old));
        assert!(state.detected_badge.is_some());
    }

    #[test]
    fn detection_switches_selector_and_starts_badge_timers() {
        let mut state = ConsoleState::default();
        let timers = state.apply_detected_language(Some(Language::Python)).unwrap();

        assert_eq!(state.language, Language::Python);
        assert!(state.language_flash);
        assert_eq!(
            state.detected_badge,
            Some(DetectedBadge { language: Language::Python, fading: false })
        );

        let timeline = timers.timeline();
        assert_eq!(timeline[0].0, Duration::from_secs(1));
        assert!(matches!(timeline[0].1, Message::FlashEnded(t) if t == timers.flash));
        assert_eq!(timeline[1].0, Duration::from_secs(4));
        assert!(matches!(timeline[1].1, Message::FadeDetectedBadge(t) if t == timers.badge));
        assert_eq!(timeline[2].0, Duration::from_secs(5));
        assert!(matches!(timeline[2].1, Message::RemoveDetectedBadge(t) if t == timers.badge));

        for (_, message) in timeline {
            let _ = state.update(message);
        }
        assert!(!state.language_flash);
        assert!(state.detected_badge.is_none());
    }

    #[test]
    fn same_or_missing_detection_changes_nothing() {
        let mut state = ConsoleState::default();
        state.language = Language::Go;
        assert!(state.apply_detected_language(Some(Language::Go)).is_none());
        assert!(state.apply_detected_language(None).is_none());
        assert!(!state.language_flash);
        assert!(state.detected_badge.is_none());
    }

    #[test]
    fn newer_detection_outlives_older_badge_timers() {
        let mut state = ConsoleState::default();
        let first = state.apply_detected_language(Some(Language::Rust)).unwrap();
        let second = state.apply_detected_language(Some(Language::Shell)).unwrap();

        let _ = state.update(Message::RemoveDetectedBadge(first.badge));
        let _ = state.update(Message::FlashEnded(first.flash));
        assert_eq!(state.detected_badge.as_ref().map(|b| b.language), Some(Language::Shell));
        assert!(state.language_flash);

        let _ = state.update(Message::FadeDetectedBadge(second.badge));
        assert!(state.detected_badge.as_ref().unwrap().fading);
    }

    #[test]
    fn file_path_selects_upload() {
        let mut state = ConsoleState::default();
        let _ = state.update(Message::FilePathChanged(" sample.py ".to_string()));
        assert_eq!(
            state.scan_input(),
            Some(ScanInput::File { path: PathBuf::from("sample.py") })
        );
        let _ = state.update(Message::ClearFile);
        assert_eq!(state.scan_input(), None);
    }
}
