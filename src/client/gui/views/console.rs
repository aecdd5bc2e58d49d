use iced::{Element, Length, Alignment, Color, Font};
use iced::widget::{Column, Row, Text, TextInput, Button, PickList, Container, Scrollable, Space, text_editor};
use crate::client::gui::views::logger::logger_view;
use crate::client::gui::widgets::{code_preview, risk_badge, warning_list};
use crate::client::models::app_state::ConsoleState;
use crate::client::models::messages::Message;
use crate::client::models::report::ScanReport;
use crate::common::models::Language;

// Colour palette
const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.18); // Deep navy
const CARD_BG: Color = Color::from_rgb(0.18, 0.19, 0.36); // Muted indigo for card bodies
const INPUT_BG: Color = Color::from_rgb(0.12, 0.13, 0.26); // Input background
const ACCENT_COLOR: Color = Color::from_rgb(0.0, 0.7, 0.3); // Green accent
const ALERT_COLOR: Color = Color::from_rgb(0.94, 0.27, 0.27);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

fn bg_main_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(BG_MAIN)),
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}

fn card(highlight: Option<Color>) -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(CARD_BG)),
            text_color: Some(TEXT_PRIMARY),
            border: iced::Border {
                width: if highlight.is_some() { 2.0 } else { 0.0 },
                color: highlight.unwrap_or(Color::TRANSPARENT),
                radius: 16.0.into(),
            },
            shadow: iced::Shadow {
                offset: iced::Vector::new(0.0, 4.0),
                blur_radius: if highlight.is_some() { 24.0 } else { 12.0 },
                color: match highlight {
                    Some(c) => Color { a: 0.6, ..c },
                    None => Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                },
            },
        }
    }))
}

fn outlined(color: Color, width: f32) -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(INPUT_BG)),
            text_color: Some(TEXT_PRIMARY),
            border: iced::Border {
                width,
                color,
                radius: 12.0.into(),
            },
            ..Default::default()
        }
    }))
}

pub fn view(state: &ConsoleState) -> Element<'_, Message> {
    let header = Column::new()
        .spacing(4)
        .push(Text::new("Phoenix AI Scan").font(BOLD_FONT).size(28).style(TEXT_PRIMARY))
        .push(
            Text::new("Paste code or pick a file to check it for dangerous operations.")
                .size(14)
                .style(TEXT_SECONDARY),
        );

    let content = Column::new()
        .spacing(16)
        .padding(24)
        .max_width(960)
        .push(header)
        .push(input_card(state))
        .push(logger_view(&state.logger))
        .push(result_card(state));

    Container::new(Scrollable::new(Container::new(content).width(Length::Fill).center_x()))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(bg_main_appearance)))
        .into()
}

fn input_card(state: &ConsoleState) -> Element<'_, Message> {
    // Editor: a red outline stands in for the shake while it lasts
    let editor_border = if state.shaking { (ALERT_COLOR, 2.0) } else { (Color::from_rgb(0.3, 0.3, 0.4), 1.0) };
    let editor = Container::new(
        text_editor(&state.editor)
            .on_action(Message::EditorAction)
            .font(Font::MONOSPACE)
            .height(Length::Fixed(220.0))
            .padding(12),
    )
    .style(outlined(editor_border.0, editor_border.1));

    let file_row = Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new("File").size(14).style(TEXT_SECONDARY))
        .push(
            TextInput::new("path/to/file.py (takes priority over pasted code)", &state.file_path)
                .on_input(Message::FilePathChanged)
                .on_submit(Message::Scan)
                .padding(10)
                .size(14)
                .width(Length::Fill),
        )
        .push(
            Button::new(Text::new("✕").size(14))
                .on_press(Message::ClearFile)
                .style(iced::theme::Button::Secondary)
                .padding(8),
        );

    let flash = if state.language_flash { (ACCENT_COLOR, 2.0) } else { (Color::TRANSPARENT, 0.0) };
    let selector = Container::new(
        PickList::new(Language::all(), Some(state.language), Message::LanguageSelected)
            .placeholder("Language")
            .width(Length::Fixed(160.0)),
    )
    .padding(4)
    .style(outlined(flash.0, flash.1));

    let detected: Element<Message> = match &state.detected_badge {
        Some(badge) => risk_badge::detected(badge),
        None => Space::new(Length::Shrink, Length::Shrink).into(),
    };

    let mut scan_btn = Button::new(Text::new(state.scan_label).size(16))
        .style(iced::theme::Button::Primary)
        .padding([10, 20]);
    if state.scan_enabled {
        scan_btn = scan_btn.on_press(Message::Scan);
    }

    let clear_btn = Button::new(Text::new("Clear").size(16))
        .on_press(Message::Clear)
        .style(iced::theme::Button::Secondary)
        .padding([10, 20]);

    let controls = Row::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .push(selector)
        .push(detected)
        .push(Space::new(Length::Fill, Length::Shrink))
        .push(clear_btn)
        .push(scan_btn);

    Container::new(Column::new().spacing(12).push(editor).push(file_row).push(controls))
        .padding(20)
        .width(Length::Fill)
        .style(card(None))
        .into()
}

fn result_card(state: &ConsoleState) -> Element<'_, Message> {
    let report = match (&state.report, state.result_visible) {
        (Some(report), true) => report,
        _ => return Space::new(Length::Fill, Length::Fixed(0.0)).into(),
    };

    let badge = risk_badge::view(&report.badge);
    let score_row = Row::new()
        .spacing(16)
        .align_items(Alignment::Center)
        .push(Text::new("Risk score").size(16).style(TEXT_SECONDARY))
        .push(Text::new(state.displayed_score.to_string()).font(BOLD_FONT).size(36).style(TEXT_PRIMARY))
        .push(badge)
        .push(language_label(report));

    let mut body = Column::new()
        .spacing(16)
        .push(score_row)
        .push(section_title("Warnings"))
        .push(warning_list::view(&report.warnings, state.animation_elapsed));

    if let Some(preview) = &report.preview {
        body = body.push(section_title("Code preview")).push(
            Container::new(code_preview::view(preview))
                .padding(8)
                .style(outlined(Color::from_rgb(0.3, 0.3, 0.4), 1.0)),
        );
    }

    if !report.summary.is_empty() {
        body = body
            .push(section_title("Risk summary"))
            .push(warning_list::summary_view(&report.summary));
    }

    let highlight = if state.pulsing { Some(risk_badge::level_color(&report.badge.level)) } else { None };
    Container::new(body)
        .padding(20)
        .width(Length::Fill)
        .style(card(highlight))
        .into()
}

fn language_label(report: &ScanReport) -> Element<'_, Message> {
    match &report.language {
        Some(lang) => Text::new(format!("Language: {}", lang)).size(14).style(TEXT_SECONDARY).into(),
        None => Space::new(Length::Shrink, Length::Shrink).into(),
    }
}

fn section_title(title: &str) -> Element<'_, Message> {
    Text::new(title).font(BOLD_FONT).size(18).style(TEXT_PRIMARY).into()
}
