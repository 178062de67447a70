//! Result list widget — presented search fragments in the main pane.
//!
//! Renders the presenter's output: each fragment is a title line plus the
//! matched field text with query occurrences highlighted. The informational
//! no-results fragment renders dimmed and cannot be activated.
//!
//! The presenter caps fragments at ten, so the list never scrolls; the
//! cursor walks the activatable fragments and `Enter` (handled by the app
//! shell via [`ResultListState::selected`]) opens the detail view.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use msdl_core::{Presented, RenderFragment};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultListState {
    /// Presenter output of the most recent valid query, if any.
    pub presented: Option<Presented>,
    /// Index of the highlighted fragment.
    pub cursor: usize,
}

impl ResultListState {
    /// Install a fresh presenter output, resetting the cursor.
    pub fn show(&mut self, presented: Presented) {
        self.cursor = 0;
        self.presented = Some(presented);
    }

    /// Close the results panel (query became too short).
    pub fn clear(&mut self) {
        self.presented = None;
        self.cursor = 0;
    }

    /// The fragment under the cursor, unless it is the no-results placeholder.
    pub fn selected(&self) -> Option<&RenderFragment> {
        self.presented
            .as_ref()?
            .fragments
            .get(self.cursor)
            .filter(|f| !f.is_informational())
    }

    /// Number of activatable fragments currently shown, for the search-bar
    /// counter. `None` when no search is active.
    pub fn shown_count(&self) -> Option<usize> {
        self.presented
            .as_ref()
            .map(|p| if p.is_empty { 0 } else { p.fragments.len() })
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let len = match &self.presented {
            Some(p) => p.fragments.len(),
            None => return,
        };
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            AppEvent::ScrollUp => self.cursor = 0,
            AppEvent::ScrollDown => self.cursor = len.saturating_sub(1),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    state: &'a ResultListState,
    focused: bool,
    show_kind_labels: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(
        state: &'a ResultListState,
        focused: bool,
        show_kind_labels: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            focused,
            show_kind_labels,
            theme,
        }
    }

    fn fragment_lines(&self, fragment: &RenderFragment, selected: bool) -> Vec<Line<'static>> {
        if fragment.is_informational() {
            return vec![Line::from(Span::styled(
                fragment.display_title.clone(),
                Style::default().add_modifier(Modifier::DIM),
            ))];
        }

        let mut header = vec![Span::styled(
            fragment.display_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        header.push(Span::styled(
            format!("  {}", fragment.system_name),
            Style::default().add_modifier(Modifier::DIM),
        ));
        if self.show_kind_labels {
            if let Some(kind) = fragment.kind {
                header.push(Span::styled(
                    format!(" · {kind}"),
                    self.theme.kind_style(kind).add_modifier(Modifier::DIM),
                ));
            }
        }

        let mut matched: Vec<Span<'static>> = vec![Span::raw("  ")];
        for run in &fragment.highlighted.runs {
            let style = if run.hit {
                self.theme.search_highlight
            } else {
                Style::default()
            };
            matched.push(Span::styled(run.text.clone(), style));
        }

        let mut lines = vec![Line::from(header), Line::from(matched)];
        if selected {
            lines = lines
                .into_iter()
                .map(|l| l.patch_style(Style::default().add_modifier(Modifier::REVERSED)))
                .collect();
        }
        lines
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title("Results").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = match &self.state.presented {
            None => vec![Line::from(Span::styled(
                "press / and type at least two characters to search",
                Style::default().add_modifier(Modifier::DIM),
            ))],
            Some(p) => p
                .fragments
                .iter()
                .enumerate()
                .flat_map(|(i, fragment)| {
                    let selected = self.focused && i == self.state.cursor;
                    self.fragment_lines(fragment, selected)
                })
                .collect(),
        };

        Paragraph::new(lines).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
