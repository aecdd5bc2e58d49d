use iced::widget::scrollable::{self, RelativeOffset};
use iced::widget::{Column, Container, Row, Scrollable, Text};
use iced::{Color, Command, Element, Font, Length};
use crate::client::gui::widgets::risk_badge::level_color;
use crate::client::models::messages::Message;
use crate::client::models::report::CodePreview;

const GUTTER_COLOR: Color = Color::from_rgb(0.45, 0.45, 0.55);
const CODE_COLOR: Color = Color::from_rgb(0.9, 0.9, 0.92);

fn preview_id() -> scrollable::Id {
    scrollable::Id::new("code_preview")
}

pub fn view(preview: &CodePreview) -> Element<'_, Message> {
    let mut lines = Column::new().spacing(0);
    for line in &preview.lines {
        let tint = line.risk.as_ref().map(level_color);
        let row = Row::new()
            .spacing(12)
            .push(Text::new(line.gutter()).font(Font::MONOSPACE).size(13).style(GUTTER_COLOR))
            .push(Text::new(line.text.as_str()).font(Font::MONOSPACE).size(13).style(CODE_COLOR));

        let container = Container::new(row)
            .width(Length::Fill)
            .padding([1, 8])
            .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
                match tint {
                    Some(c) => iced::widget::container::Appearance {
                        background: Some(iced::Background::Color(Color { a: 0.22, ..c })),
                        border: iced::Border {
                            width: 0.0,
                            color: c,
                            radius: 2.0.into(),
                        },
                        ..Default::default()
                    },
                    None => iced::widget::container::Appearance::default(),
                }
            })));
        lines = lines.push(container);
    }

    Scrollable::new(lines)
        .id(preview_id())
        .width(Length::Fill)
        .height(Length::Fixed(260.0))
        .into()
}

/// Scroll the preview so `line` is roughly centred.
pub fn scroll_to_line(preview: &CodePreview, line: usize) -> Command<Message> {
    let total = preview.lines.len();
    if total <= 1 || line == 0 {
        return Command::none();
    }
    let y = ((line - 1) as f32 / (total - 1) as f32).clamp(0.0, 1.0);
    scrollable::snap_to(preview_id(), RelativeOffset { x: 0.0, y })
}
