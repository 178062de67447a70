//! Title bar widget — the 1-line strip at the top of the screen.
//!
//! Shows the application name, catalog size, and document freshness on the
//! left; keybinding hints are right-aligned in the same row.

use crate::theme::Theme;
use msdl_core::Catalog;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct TitleBar<'a> {
    catalog: &'a Catalog,
    _theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(catalog: &'a Catalog, theme: &'a Theme) -> Self {
        Self {
            catalog,
            _theme: theme,
        }
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" msdl ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(
                    "{} systems · {} entries",
                    self.catalog.system_count(),
                    self.catalog.entry_count()
                ),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ];
        if let Some(ts) = self.catalog.last_updated {
            spans.push(Span::styled(
                format!(" · updated {}", ts.format("%Y-%m-%d %H:%M")),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        // Keybinding hints at the right edge
        let hint = " /:search  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
