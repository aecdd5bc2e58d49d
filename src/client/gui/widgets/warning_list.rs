use iced::widget::{Column, Container, Row, Text};
use iced::{Color, Element, Font, Length};
use std::time::Duration;
use crate::client::gui::widgets::risk_badge::level_color;
use crate::client::models::messages::Message;
use crate::client::models::report::{RiskSummary, WarningItem, NO_WARNINGS_MESSAGE};

const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);
const SAFE_GREEN: Color = Color::from_rgb(0.13, 0.77, 0.37);
const CARD_BG: Color = Color::from_rgb(0.12, 0.13, 0.26);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

/// Warning cards revealed one by one as `elapsed` passes each item's delay.
pub fn view(warnings: &[WarningItem], elapsed: Duration) -> Element<'_, Message> {
    if warnings.is_empty() {
        return Text::new(NO_WARNINGS_MESSAGE).size(15).style(SAFE_GREEN).into();
    }

    let mut column = Column::new().spacing(8);
    for w in warnings.iter().filter(|w| w.delay <= elapsed) {
        let accent = level_color(&w.risk);
        let body = Column::new()
            .spacing(4)
            .push(
                Row::new()
                    .spacing(8)
                    .push(Text::new(format!("Line {}", w.line)).font(BOLD_FONT).size(14).style(TEXT_PRIMARY))
                    .push(Text::new(w.code.as_str()).font(Font::MONOSPACE).size(13).style(TEXT_SECONDARY)),
            )
            .push(Text::new(w.category.as_str()).size(13).style(accent))
            .push(Text::new(format!("⚠️ {}", w.explanation)).size(13).style(TEXT_PRIMARY));

        column = column.push(
            Container::new(body)
                .width(Length::Fill)
                .padding([8, 12])
                .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
                    iced::widget::container::Appearance {
                        background: Some(iced::Background::Color(CARD_BG)),
                        border: iced::Border {
                            width: 1.0,
                            color: accent,
                            radius: 8.0.into(),
                        },
                        ..Default::default()
                    }
                }))),
        );
    }
    column.into()
}

/// Per-risk blocks listing the categories seen at that level.
pub fn summary_view(summary: &RiskSummary) -> Element<'_, Message> {
    let mut column = Column::new().spacing(14);
    for group in &summary.groups {
        let color = level_color(&crate::common::models::RiskLevel::parse(&group.risk));
        let mut block = Column::new()
            .spacing(4)
            .push(Text::new(format!("{} ({})", group.risk, group.total)).font(BOLD_FONT).size(14).style(color));
        for (category, count) in &group.categories {
            let label = if *count > 1 {
                format!("• {} ×{}", category, count)
            } else {
                format!("• {}", category)
            };
            block = block.push(Text::new(label).size(13).style(TEXT_SECONDARY));
        }
        column = column.push(block);
    }
    column.into()
}
