use crate::client::config::ClientConfig;
use iced::widget::text_editor;
use iced::Command;
use std::time::Duration;

/// Token handed out by a [`Debouncer`]; only the newest one is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceToken(u64);

/// Cancel-on-supersede bookkeeping for delayed callbacks.
///
/// Scheduling a new callback invalidates every token issued before it, so a
/// timer that fires late simply finds itself outdated and does nothing.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self) -> DebounceToken {
        self.generation += 1;
        DebounceToken(self.generation)
    }

    pub fn is_current(&self, token: DebounceToken) -> bool {
        token.0 == self.generation
    }

    /// Drop whatever is pending.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

/// What caused an auto-detect request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDetectTrigger {
    Typing,
    Paste,
}

impl AutoDetectTrigger {
    /// Classify an editor action. Cursor moves and selections trigger nothing.
    pub fn from_action(action: &text_editor::Action) -> Option<Self> {
        match action {
            text_editor::Action::Edit(text_editor::Edit::Paste(_)) => Some(AutoDetectTrigger::Paste),
            text_editor::Action::Edit(_) => Some(AutoDetectTrigger::Typing),
            _ => None,
        }
    }

    pub fn delay(&self, config: &ClientConfig) -> Duration {
        match self {
            AutoDetectTrigger::Typing => config.auto_detect_idle,
            AutoDetectTrigger::Paste => config.auto_detect_paste,
        }
    }
}

/// Emit `message` after `delay`.
pub fn sleep_then<M>(delay: Duration, message: M) -> Command<M>
where
    M: Send + 'static,
{
    Command::perform(
        async move {
            tokio::time::sleep(delay).await;
            message
        },
        |msg| msg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_schedule_supersedes_older() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule();
        let second = debouncer.schedule();
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }

    #[test]
    fn cancel_invalidates_pending_token() {
        let mut debouncer = Debouncer::new();
        let token = debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.is_current(token));
    }

    #[test]
    fn editor_actions_map_to_triggers() {
        use std::sync::Arc;
        use text_editor::{Action, Edit, Motion};

        let paste = Action::Edit(Edit::Paste(Arc::new("import os".to_string())));
        assert_eq!(AutoDetectTrigger::from_action(&paste), Some(AutoDetectTrigger::Paste));
        assert_eq!(
            AutoDetectTrigger::from_action(&Action::Edit(Edit::Insert('x'))),
            Some(AutoDetectTrigger::Typing)
        );
        assert_eq!(
            AutoDetectTrigger::from_action(&Action::Edit(Edit::Backspace)),
            Some(AutoDetectTrigger::Typing)
        );
        assert_eq!(AutoDetectTrigger::from_action(&Action::Move(Motion::Left)), None);
        assert_eq!(AutoDetectTrigger::from_action(&Action::SelectWord), None);

        let cfg = ClientConfig::default();
        let delay = AutoDetectTrigger::from_action(&paste).map(|t| t.delay(&cfg));
        assert_eq!(delay, Some(cfg.auto_detect_paste));
    }

    #[test]
    fn paste_fires_sooner_than_typing() {
        let cfg = ClientConfig::default();
        assert_eq!(AutoDetectTrigger::Typing.delay(&cfg), Duration::from_millis(500));
        assert_eq!(AutoDetectTrigger::Paste.delay(&cfg), Duration::from_millis(100));
    }
}
