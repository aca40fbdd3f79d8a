use ratatui::style::{Color, Modifier, Style};

use crate::ui::model::LatencyStatus;

pub(super) const PANEL_WIDTH: u16 = 38;
pub(super) const PANEL_HEIGHT: u16 = 14;
pub(super) const PANEL_MARGIN: u16 = 1;
pub(super) const PANEL_TITLE: &str = " Latency Monitor ";
pub(super) const PANEL_BG_RGB: (u8, u8, u8) = (0x0a, 0x0a, 0x0a);
pub(super) const PANEL_BORDER_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);
pub(super) const PANEL_TEXT_RGB: (u8, u8, u8) = (0xe5, 0xe7, 0xeb);
pub(super) const ACCENT_GREEN_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);
pub(super) const ACCENT_AMBER_RGB: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);
pub(super) const ACCENT_RED_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);

pub(super) fn style_color(no_color: bool, color: Color) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(color)
    }
}

pub(super) const fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub(super) fn status_style(no_color: bool, status: LatencyStatus) -> Style {
    let color = match status {
        LatencyStatus::Good => ACCENT_GREEN_RGB,
        LatencyStatus::Acceptable => ACCENT_AMBER_RGB,
        LatencyStatus::Poor => ACCENT_RED_RGB,
    };
    style_color(no_color, rgb(color))
}

pub(super) fn panel_block_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default()
            .bg(rgb(PANEL_BG_RGB))
            .fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn panel_border_style(no_color: bool) -> Style {
    style_color(no_color, rgb(PANEL_BORDER_RGB))
}

pub(super) fn heading_style(no_color: bool) -> Style {
    panel_border_style(no_color).add_modifier(Modifier::BOLD)
}
