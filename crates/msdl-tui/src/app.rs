//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All state transitions
//! live on [`AppState`], which takes the current time as a parameter so the
//! debounce wiring is deterministic under test.

use crate::{
    clipboard,
    commands::Command,
    debounce::Debouncer,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        catalog_tree::{CatalogTree, CatalogTreeState},
        command_bar::{CommandBar, CommandBarState},
        detail::{Detail, DetailState},
        help::HelpPopup,
        result_list::{ResultList, ResultListState},
        search_bar::{SearchBar, SearchBarState},
        title_bar::TitleBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use msdl_core::{config::Config, present, search, Catalog, Query, SubtypeRef};
use msdl_data::{CatalogSource, CatalogWatcher};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    /// The right pane: result list, or the detail view when one is open.
    Main,
    Search,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub catalog: Catalog,
    pub source: CatalogSource,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub tree: CatalogTreeState,
    pub search: SearchBarState,
    pub results: ResultListState,
    /// Open detail view; decides what the main pane shows.
    pub detail: Option<DetailState>,
    pub command_bar: CommandBarState,
    pub debounce: Debouncer,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    /// Bottom-row notice: manual-copy fallback text or reload failures.
    pub notice: Option<String>,
    pub quit: bool,
}

impl AppState {
    pub fn new(catalog: Catalog, source: CatalogSource, config: Config, theme: Theme) -> Self {
        let tree = CatalogTreeState::from_catalog(&catalog);
        let debounce = Debouncer::new(Duration::from_millis(config.search.debounce_ms));
        Self {
            catalog,
            source,
            focus: Focus::Tree,
            prev_focus: Focus::Tree,
            tree,
            search: SearchBarState::default(),
            results: ResultListState::default(),
            detail: None,
            command_bar: CommandBarState::default(),
            debounce,
            theme,
            config,
            show_help: false,
            notice: None,
            quit: false,
        }
    }

    /// Advance time-driven state: fire the debounced search when its quiet
    /// interval has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.poll(now).is_some() {
            self.run_search();
        }
    }

    pub fn handle(&mut self, event: AppEvent, now: Instant) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                AppEvent::Enter => {
                    let input = self.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                            self.execute_command(cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input — just close
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            self.command_bar.error = Some(msg);
                        }
                    }
                }
                other => self.command_bar.handle(&other),
            }
            return;
        }

        // A notice is dismissed by whatever key comes next.
        if self.notice.is_some() {
            self.notice = None;
        }

        match event {
            // Toggle help (only when not typing in the search bar)
            AppEvent::Char('?') if self.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            // Enter command mode with `:` (not from the search bar)
            AppEvent::Char(':') if self.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            // Escape cascades: leave search → close detail → close results
            AppEvent::Escape => {
                if self.focus == Focus::Search {
                    tracing::debug!("focus: Search -> Tree");
                    self.focus = Focus::Tree;
                } else if self.detail.is_some() {
                    tracing::debug!("detail closed");
                    self.detail = None;
                } else if self.results.presented.is_some() {
                    tracing::debug!("results panel closed");
                    self.results.clear();
                }
            }

            // Tab-cycle focus: Tree → Main → Search → Tree
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Tree => Focus::Main,
                    Focus::Main => Focus::Search,
                    Focus::Search | Focus::Command => Focus::Tree,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::SearchFocus => {
                tracing::debug!("focus -> Search");
                self.focus = Focus::Search;
            }

            AppEvent::Reload => self.reload(),

            AppEvent::Yank => self.yank(now),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other, now),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent, now: Instant) {
        match self.focus {
            Focus::Tree => {
                if event == AppEvent::Enter {
                    if let Some(target) = self.tree.selected_target() {
                        self.open_detail(target);
                        return;
                    }
                }
                self.tree.handle(&event);
            }
            Focus::Main => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.handle(&event);
                } else if event == AppEvent::Enter {
                    if let Some(target) = self.results.selected().and_then(|f| f.target.clone()) {
                        self.open_detail(target);
                    }
                } else {
                    self.results.handle(&event);
                }
            }
            Focus::Search => {
                if event == AppEvent::Enter {
                    // Immediate search, skipping the quiet interval
                    self.debounce.cancel();
                    self.run_search();
                } else if self.search.handle(&event) {
                    self.debounce.schedule(now);
                }
            }
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }

    /// Guard the query, then run Matcher → Presenter and open the panel.
    /// A too-short query closes the panel without invoking the core.
    fn run_search(&mut self) {
        match Query::parse(&self.search.input) {
            Some(query) => {
                let records = search(&self.catalog, &query);
                let presented = present(&records, &query);
                tracing::debug!(
                    query = %query,
                    records = records.len(),
                    fragments = presented.fragments.len(),
                    "search presented"
                );
                self.results.show(presented);
                self.detail = None;
            }
            None => self.results.clear(),
        }
    }

    fn open_detail(&mut self, target: SubtypeRef) {
        let Some(subtype) = self.catalog.get(&target) else {
            // Fragments always reference the catalog they were searched in;
            // a dangling target can only appear across reloads.
            tracing::warn!(%target, "entry no longer in catalog");
            return;
        };
        let system_name = self
            .catalog
            .system(&target.system)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| target.system.clone());
        tracing::debug!(%target, "detail opened");
        self.detail = Some(DetailState::open(target, system_name, subtype.clone()));
        self.focus = Focus::Main;
    }

    /// Reload the catalog from its source. On failure the previous catalog
    /// stays in place and the error lands in the footer notice.
    fn reload(&mut self) {
        let open_detail = self
            .detail
            .as_ref()
            .map(|d| (d.target.clone(), d.link_cursor));

        match self.source.load() {
            Ok(catalog) => {
                tracing::info!(
                    systems = catalog.system_count(),
                    entries = catalog.entry_count(),
                    "catalog reloaded"
                );
                self.catalog = catalog;
                self.tree = CatalogTreeState::from_catalog(&self.catalog);

                // Re-run the active search so fragments reference the new
                // catalog, then restore the detail view if its entry survived.
                if self.results.presented.is_some() {
                    self.run_search();
                }
                if let Some((target, link_cursor)) = open_detail {
                    match self.catalog.get(&target) {
                        Some(subtype) => {
                            let system_name = self
                                .catalog
                                .system(&target.system)
                                .map(|s| s.name.clone())
                                .unwrap_or_else(|| target.system.clone());
                            let mut detail =
                                DetailState::open(target, system_name, subtype.clone());
                            detail.link_cursor = link_cursor
                                .min(detail.subtype.download_links.len().saturating_sub(1));
                            self.detail = Some(detail);
                        }
                        None => self.detail = None,
                    }
                }
            }
            Err(err) => {
                tracing::warn!(%err, source = %self.source, "catalog reload failed");
                self.notice = Some(format!("reload failed: {err}"));
            }
        }
    }

    /// Copy the selected download link. When the terminal write fails, fall
    /// back to showing the link in the footer for manual copying.
    fn yank(&mut self, now: Instant) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let Some(link) = detail.selected_link().map(str::to_string) else {
            return;
        };
        match clipboard::copy(&link) {
            Ok(()) => {
                tracing::debug!(link = %link, "link copied");
                detail.mark_copied(now);
            }
            Err(err) => {
                tracing::warn!(%err, "clipboard write failed");
                self.notice = Some(format!("copy failed — select manually: {link}"));
            }
        }
    }

    /// Execute a parsed [`Command`].
    fn execute_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.quit = true,
            Command::Help => self.show_help = !self.show_help,
            Command::Theme(name) => {
                self.theme = match name.to_ascii_lowercase().as_str() {
                    "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Theme::load_gruvbox_dark(),
                    _ => Theme::load_default(),
                };
            }
            Command::Reload => self.reload(),
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(catalog: Catalog, source: CatalogSource, config: Config, theme: Theme) -> Self {
        App {
            state: AppState::new(catalog, source, config, theme),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self, mut watcher: Option<CatalogWatcher>) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal, watcher.as_mut());

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        mut watcher: Option<&mut CatalogWatcher>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.state.handle(ev, Instant::now());
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev, Instant::now());
                        }
                    }
                }
            }

            if let Some(w) = watcher.as_deref_mut() {
                if w.changed() {
                    tracing::info!("catalog changed on disk");
                    self.state.reload();
                }
            }

            self.state.tick(Instant::now());
        }
        Ok(())
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line title bar | body | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    // Horizontal body split
    let pct = state.config.ui.tree_pane_width_pct;
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    frame.render_widget(TitleBar::new(&state.catalog, &state.theme), vert[0]);
    frame.render_widget(
        CatalogTree::new(&state.tree, state.focus == Focus::Tree, &state.theme),
        horiz[0],
    );
    if let Some(detail) = &state.detail {
        frame.render_widget(
            Detail::new(detail, state.focus == Focus::Main, &state.theme),
            horiz[1],
        );
    } else {
        frame.render_widget(
            ResultList::new(
                &state.results,
                state.focus == Focus::Main,
                state.config.ui.show_kind_labels,
                &state.theme,
            ),
            horiz[1],
        );
    }
    frame.render_widget(
        SearchBar::new(
            &state.search,
            state.focus == Focus::Search,
            state.results.shown_count(),
            &state.theme,
        ),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return; // cursor is set; skip search-bar cursor below
    }

    // Footer notice overlays the same row when present
    if let Some(ref notice) = state.notice {
        let row = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(Clear, row);
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!(" {notice} "),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            row,
        );
    }

    // Position the terminal cursor when the search bar is focused
    if state.focus == Focus::Search {
        let sb = SearchBar::new(
            &state.search,
            true,
            state.results.shown_count(),
            &state.theme,
        );
        let (cx, cy) = sb.cursor_position(vert[2]);
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
