use crate::client::services::scan_console::ScanOutcome;
use crate::client::services::scheduler::DebounceToken;
use crate::common::models::Language;
use iced::widget::text_editor;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Message {
    // Input
    EditorAction(text_editor::Action),
    FilePathChanged(String),
    ClearFile,
    LanguageSelected(Language),
    // Main scan
    Scan,
    ScanFinished(Arc<ScanOutcome>),
    Clear,
    ScoreTick { animation: u64 },
    // Auto-detect side channel
    DetectDue(DebounceToken),
    LanguageDetected(DebounceToken, Option<Language>),
    FadeDetectedBadge(DebounceToken),
    RemoveDetectedBadge(DebounceToken),
    FlashEnded(DebounceToken),
    // Attention effects
    ShakeEnded(DebounceToken),
    PulseEnded(DebounceToken),
}
