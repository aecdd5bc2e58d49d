use iced::widget::text_editor;
use iced::{Application, Command, Element, Theme};
use crate::client::config::ClientConfig;
use crate::client::gui::widgets::code_preview;
use crate::client::models::app_state::{ConsoleState, UiEffect};
use crate::client::models::messages::Message;
use crate::client::models::report::SCORE_TICK;
use crate::client::services::scan_api::ScanBackend;
use crate::client::services::scan_console::{detect_language, ScanConsole};
use crate::client::services::scheduler::{sleep_then, AutoDetectTrigger};
use std::sync::Arc;
use std::time::Duration;

const SHAKE_DURATION: Duration = Duration::from_millis(400);
const PULSE_DURATION: Duration = Duration::from_millis(1200);

/// Startup parameters handed to the iced runtime.
pub struct ConsoleFlags {
    pub config: ClientConfig,
    pub backend: Arc<dyn ScanBackend>,
    /// Optional file preselected from the command line.
    pub initial_file: Option<String>,
}

pub struct ScanConsoleApp {
    pub state: ConsoleState,
    pub console: ScanConsole,
    pub backend: Arc<dyn ScanBackend>,
    pub config: ClientConfig,
}

impl ScanConsoleApp {
    /// Turn the effects queued by the view into timers and widget commands.
    fn effect_commands(&mut self) -> Command<Message> {
        let mut commands = Vec::new();
        for effect in self.state.take_effects() {
            let cmd = match effect {
                UiEffect::Shake => {
                    let token = self.state.shake_timer.schedule();
                    sleep_then(SHAKE_DURATION, Message::ShakeEnded(token))
                }
                UiEffect::Pulse => {
                    let token = self.state.pulse_timer.schedule();
                    sleep_then(PULSE_DURATION, Message::PulseEnded(token))
                }
                UiEffect::AnimateScore => sleep_then(
                    SCORE_TICK,
                    Message::ScoreTick { animation: self.state.animation_id },
                ),
                UiEffect::ScrollToLine(line) => match self.state.report.as_ref().and_then(|r| r.preview.as_ref()) {
                    Some(preview) => code_preview::scroll_to_line(preview, line),
                    None => Command::none(),
                },
            };
            commands.push(cmd);
        }
        Command::batch(commands)
    }
}

impl Application for ScanConsoleApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = ConsoleFlags;

    fn new(flags: ConsoleFlags) -> (Self, Command<Message>) {
        let mut state = ConsoleState::default();
        if let Some(path) = flags.initial_file {
            state.file_path = path;
        }
        let app = ScanConsoleApp {
            state,
            console: ScanConsole::new(&flags.config),
            backend: flags.backend,
            config: flags.config,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        "Phoenix AI Scan".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::EditorAction(action) => {
                let trigger = AutoDetectTrigger::from_action(&action);
                self.state.editor.perform(action);
                let Some(trigger) = trigger else {
                    return Command::none();
                };
                let token = self.console.schedule_detect();
                sleep_then(trigger.delay(&self.config), Message::DetectDue(token))
            }
            Message::DetectDue(token) => {
                if !self.console.is_detect_current(token) {
                    return Command::none();
                }
                let code = self.state.code();
                if !self.console.should_detect(&code, self.state.selected_file().is_some()) {
                    return Command::none();
                }
                let backend = self.backend.clone();
                Command::perform(
                    async move { detect_language(backend.as_ref(), &code).await },
                    move |detected| Message::LanguageDetected(token, detected),
                )
            }
            Message::LanguageDetected(token, detected) => {
                if !self.console.accepts_detection(token, self.state.selected_file().is_some()) {
                    log::debug!("Ignoring outdated language preview");
                    return Command::none();
                }
                match self.state.apply_detected_language(detected) {
                    Some(timers) => Command::batch(
                        timers
                            .timeline()
                            .into_iter()
                            .map(|(delay, message)| sleep_then(delay, message)),
                    ),
                    None => Command::none(),
                }
            }
            Message::Scan => {
                let input = self.state.scan_input();
                let pending = self.console.begin_scan(input, &mut self.state);
                let effects = self.effect_commands();
                let Some(pending) = pending else {
                    return effects;
                };
                let backend = self.backend.clone();
                let request = Command::perform(
                    async move { pending.execute(backend.as_ref()).await },
                    |outcome| Message::ScanFinished(Arc::new(outcome)),
                );
                Command::batch(vec![effects, request])
            }
            Message::ScanFinished(outcome) => {
                self.console.complete_scan(&outcome, &mut self.state);
                self.effect_commands()
            }
            Message::Clear => {
                self.state.editor = text_editor::Content::new();
                self.state.file_path.clear();
                self.console.clear(&mut self.state);
                Command::none()
            }
            Message::ScoreTick { animation } => {
                if animation != self.state.animation_id {
                    return Command::none();
                }
                if self.state.tick_score() {
                    sleep_then(SCORE_TICK, Message::ScoreTick { animation })
                } else {
                    Command::none()
                }
            }
            other => self.state.update(other),
        }
    }

    fn view(&self) -> Element<Message> {
        crate::client::gui::views::console::view(&self.state)
    }
}
