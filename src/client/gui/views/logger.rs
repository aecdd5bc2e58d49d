use iced::{Element, Length};
use iced::widget::{Column, Row, Text};
use iced::widget::Container;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

impl LogMessage {
    pub fn color(&self) -> iced::Color {
        match self.level {
            LogLevel::Info => iced::Color::from_rgb(0.98, 0.8, 0.08),
            LogLevel::Error => iced::Color::from_rgb(0.94, 0.27, 0.27),
        }
    }
}

/// Status bar: shows only the latest message. Multi-line messages keep their line breaks.
pub fn logger_view(messages: &[LogMessage]) -> Element<'_, crate::client::models::messages::Message> {
    if let Some(log) = messages.iter().next_back() {
        let color = log.color();
        let mut lines = Column::new().spacing(4);
        for (i, line) in log.message.lines().enumerate() {
            // first line is the message, the rest are hints
            let size = if i == 0 { 16 } else { 13 };
            lines = lines.push(Text::new(line).size(size).style(color));
        }
        Container::new(Row::new().spacing(12).push(lines))
            .padding([12, 16])
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
                iced::widget::container::Appearance {
                    background: Some(iced::Background::Color(iced::Color::from_rgb(0.1, 0.11, 0.22))),
                    text_color: Some(color),
                    border: iced::Border {
                        radius: 8.0.into(),
                        width: 1.0,
                        color,
                    },
                    shadow: iced::Shadow {
                        offset: iced::Vector::new(0.0, 4.0),
                        blur_radius: 12.0,
                        color: iced::Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    },
                }
            })))
            .into()
    } else {
        iced::widget::Space::new(Length::Fill, Length::Fixed(0.0)).into()
    }
}
