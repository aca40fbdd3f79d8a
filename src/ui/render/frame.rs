use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame, text},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::model::{PanelData, SeriesPanel};

use super::theme::{
    PANEL_HEIGHT, PANEL_MARGIN, PANEL_TITLE, PANEL_WIDTH, heading_style, panel_block_style,
    panel_border_style, status_style,
};

pub(crate) fn draw_panel<B: Backend>(f: &mut Frame<'_, B>, data: &PanelData) {
    let area = panel_area(f.size());
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut lines = Vec::with_capacity(11);
    for (idx, section) in data.sections().enumerate() {
        if idx > 0 {
            lines.push(text::Line::from(""));
        }
        push_section(&mut lines, section, data.no_color);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(PANEL_TITLE, heading_style(data.no_color)))
        .border_style(panel_border_style(data.no_color))
        .style(panel_block_style(data.no_color));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn push_section(lines: &mut Vec<text::Line<'static>>, section: &SeriesPanel, no_color: bool) {
    lines.push(text::Line::from(Span::styled(
        section.title,
        heading_style(no_color),
    )));
    lines.push(text::Line::from(vec![
        Span::from("  Last: "),
        Span::styled(section.last.clone(), status_style(no_color, section.last_status)),
    ]));
    lines.push(text::Line::from(vec![
        Span::from("  Avg: "),
        Span::styled(section.avg.clone(), status_style(no_color, section.avg_status)),
    ]));
    lines.push(text::Line::from(format!("  Min/Max: {}", section.min_max)));
    lines.push(text::Line::from(format!("  Samples: {}", section.samples)));
}

/// Bottom-right corner of `size`, shrunk to fit small terminals.
pub(super) fn panel_area(size: Rect) -> Rect {
    let width = PANEL_WIDTH.min(size.width.saturating_sub(PANEL_MARGIN));
    let height = PANEL_HEIGHT.min(size.height.saturating_sub(PANEL_MARGIN));
    let x = size
        .x
        .saturating_add(size.width.saturating_sub(width.saturating_add(PANEL_MARGIN)));
    let y = size
        .y
        .saturating_add(size.height.saturating_sub(height.saturating_add(PANEL_MARGIN)));
    Rect::new(x, y, width, height)
}
