// Severity colours and the two badges of the console
use iced::widget::{Container, Text};
use iced::{Color, Element, Font};
use crate::client::models::app_state::DetectedBadge;
use crate::client::models::messages::Message;
use crate::client::models::report::Badge;
use crate::common::models::RiskLevel;

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

pub fn level_color(level: &RiskLevel) -> Color {
    match level {
        RiskLevel::Safe => Color::from_rgb(0.13, 0.77, 0.37),
        RiskLevel::Low => Color::from_rgb(0.23, 0.51, 0.96),
        RiskLevel::Medium => Color::from_rgb(0.98, 0.8, 0.08),
        RiskLevel::High => Color::from_rgb(0.98, 0.45, 0.09),
        RiskLevel::Critical => Color::from_rgb(0.94, 0.27, 0.27),
        RiskLevel::Unknown(_) => Color::from_rgb(0.6, 0.6, 0.65),
    }
}

fn pill<'a>(label: String, background: Color, text: Color) -> Element<'a, Message> {
    Container::new(Text::new(label).font(BOLD_FONT).size(14).style(text))
        .padding([4, 12])
        .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
            iced::widget::container::Appearance {
                background: Some(iced::Background::Color(background)),
                text_color: Some(text),
                border: iced::Border {
                    radius: 12.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })))
        .into()
}

/// Severity badge showing the literal level returned by the backend.
pub fn view<'a>(badge: &Badge) -> Element<'a, Message> {
    pill(badge.text.clone(), level_color(&badge.level), Color::WHITE)
}

/// "Detected: <lang>" badge; dimmed during its fade-out second.
pub fn detected<'a>(badge: &DetectedBadge) -> Element<'a, Message> {
    let alpha = if badge.fading { 0.35 } else { 1.0 };
    pill(
        format!("Detected: {}", badge.language),
        Color::from_rgba(0.0, 0.7, 0.3, alpha),
        Color::from_rgba(1.0, 1.0, 1.0, alpha),
    )
}
