//! Detail view — one catalog entry in the main pane.
//!
//! Shows the entry's title, release and version notes, and its download
//! links. `↑`/`↓` move the link cursor; `y` (handled by the app shell via
//! [`DetailState::selected_link`]) copies the selected link and a transient
//! "copied" marker is shown next to it.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use msdl_core::{Subtype, SubtypeRef};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use std::time::{Duration, Instant};

/// How long the "copied" marker stays visible.
const COPIED_MARKER_TTL: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct DetailState {
    pub target: SubtypeRef,
    pub system_name: String,
    /// Snapshot of the entry at open time; refreshed on catalog reload.
    pub subtype: Subtype,
    /// Cursor into `subtype.download_links`.
    pub link_cursor: usize,
    copied_at: Option<Instant>,
}

impl DetailState {
    pub fn open(target: SubtypeRef, system_name: String, subtype: Subtype) -> Self {
        Self {
            target,
            system_name,
            subtype,
            link_cursor: 0,
            copied_at: None,
        }
    }

    /// The link string under the cursor, when that entry carries one.
    pub fn selected_link(&self) -> Option<&str> {
        self.subtype
            .download_links
            .get(self.link_cursor)?
            .download_link
            .as_deref()
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    fn copied_recently(&self, now: Instant) -> bool {
        self.copied_at
            .map(|at| now.duration_since(at) < COPIED_MARKER_TTL)
            .unwrap_or(false)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let len = self.subtype.download_links.len();
        if len == 0 {
            return;
        }
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.link_cursor = self.link_cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                if self.link_cursor + 1 < len {
                    self.link_cursor += 1;
                }
            }
            AppEvent::ScrollUp => self.link_cursor = 0,
            AppEvent::ScrollDown => self.link_cursor = len - 1,
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Detail<'a> {
    state: &'a DetailState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Detail<'a> {
    pub fn new(state: &'a DetailState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

impl Widget for Detail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let title = self
            .state
            .subtype
            .title
            .clone()
            .unwrap_or_else(|| self.state.target.subtype.clone());
        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let dim = Style::default().add_modifier(Modifier::DIM);
        let now = Instant::now();
        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::from(vec![
            Span::styled(self.state.system_name.clone(), self.theme.system_style(&self.state.target.system)),
            Span::styled(format!("  {}", self.state.target.detail_path()), dim),
        ]));
        if let Some(url) = self.state.subtype.url.as_deref() {
            lines.push(Line::from(Span::styled(format!("source: {url}"), dim)));
        }
        if let Some(ts) = self.state.subtype.last_updated {
            lines.push(Line::from(Span::styled(
                format!("scraped: {}", ts.format("%Y-%m-%d %H:%M")),
                dim,
            )));
        }
        if let Some(image) = self.state.subtype.image_url.as_deref() {
            lines.push(Line::from(Span::styled(format!("image: {image}"), dim)));
        }

        if let Some(release) = self.state.subtype.release_info.as_deref() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Release", self.theme.kind_release.add_modifier(Modifier::BOLD))));
            lines.push(Line::from(release.to_string()));
        }
        if let Some(version) = self.state.subtype.version_info.as_deref() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Version", self.theme.kind_version.add_modifier(Modifier::BOLD))));
            lines.push(Line::from(version.to_string()));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Downloads ({})", self.state.subtype.download_links.len()),
            self.theme.kind_download.add_modifier(Modifier::BOLD),
        )));
        for (i, link) in self.state.subtype.download_links.iter().enumerate() {
            let selected = self.focused && i == self.state.link_cursor;
            let marker = if selected { "▸ " } else { "  " };
            let mut spans = vec![Span::raw(marker.to_string())];
            if let Some(label) = link.version_title.as_deref() {
                spans.push(Span::styled(format!("{label} "), dim));
            }
            if let Some(sub) = link.sub_version.as_deref() {
                spans.push(Span::styled(format!("[{sub}] "), dim));
            }
            spans.push(Span::styled(
                link.download_link.clone().unwrap_or_else(|| "(no link)".to_string()),
                self.theme.kind_download,
            ));
            if selected && self.state.copied_recently(now) {
                spans.push(Span::styled("  ✓ copied", Style::default().add_modifier(Modifier::BOLD)));
            }
            let mut line = Line::from(spans);
            if selected {
                line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
            }
            lines.push(line);
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled("y: copy link   Esc: back", dim)));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
