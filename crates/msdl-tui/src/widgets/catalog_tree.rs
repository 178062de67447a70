//! Catalog tree widget — collapsible system/edition tree in the left pane.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible list.
//! - `→`/`l` expands the focused system; `←`/`h` collapses it.
//! - `Enter` toggles a system node; on a leaf the app shell opens the
//!   entry's detail view instead (see [`CatalogTreeState::selected_target`]).

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use msdl_core::{Catalog, SubtypeRef};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// Tree node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Stable identifier: the system key for parents, `system/subtype` for
    /// leaves.
    pub id: String,
    /// Human-readable display label.
    pub label: String,
    pub expanded: bool,
    /// Navigation target; present on leaves only.
    pub target: Option<SubtypeRef>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: true,
            target: None,
            children: Vec::new(),
        }
    }

    pub fn leaf(id: impl Into<String>, label: impl Into<String>, target: SubtypeRef) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: false,
            target: Some(target),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }
}

// ---------------------------------------------------------------------------
// Tree state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CatalogTreeState {
    pub nodes: Vec<TreeNode>,
    /// Index into the currently-visible (flattened) list.
    pub cursor: usize,
}

impl CatalogTreeState {
    /// Build the two-level tree from a catalog: systems as parents (expanded),
    /// subtypes as leaves labelled by title when they have one.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let nodes = catalog
            .systems()
            .map(|(key, system)| {
                let children = system
                    .subtypes
                    .iter()
                    .map(|(subtype_key, subtype)| {
                        let label = subtype
                            .title
                            .clone()
                            .unwrap_or_else(|| subtype_key.clone());
                        TreeNode::leaf(
                            format!("{key}/{subtype_key}"),
                            label,
                            SubtypeRef::new(key, subtype_key),
                        )
                    })
                    .collect();
                TreeNode::new(key, system.name.clone()).with_children(children)
            })
            .collect();
        Self { nodes, cursor: 0 }
    }

    /// Flatten the tree into `(depth, &node)` pairs, respecting expanded state.
    pub fn visible(&self) -> Vec<(usize, &TreeNode)> {
        flatten(&self.nodes, 0)
    }

    /// Navigation target of the node at the cursor — `Some` only on leaves.
    pub fn selected_target(&self) -> Option<SubtypeRef> {
        self.visible()
            .into_iter()
            .nth(self.cursor)
            .and_then(|(_, node)| node.target.clone())
    }

    fn cursor_id(&self) -> Option<String> {
        self.visible()
            .into_iter()
            .nth(self.cursor)
            .map(|(_, n)| n.id.clone())
    }

    /// Handle an [`AppEvent`], mutating state as appropriate.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                let max = self.visible().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                let max = self.visible().len().saturating_sub(1);
                self.cursor = (self.cursor + PAGE_STEP).min(max);
            }
            AppEvent::Nav(Direction::Right) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: expand");
                    set_expanded(&mut self.nodes, &id, true);
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: collapse");
                    set_expanded(&mut self.nodes, &id, false);
                    self.clamp_cursor();
                }
            }
            // Leaf Enter is intercepted by the app shell (detail view);
            // reaching here means the cursor is on a system node.
            AppEvent::Enter => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: toggle expand");
                    toggle_expanded(&mut self.nodes, &id);
                    self.clamp_cursor();
                }
            }
            _ => {}
        }
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Recursive tree helpers
// ---------------------------------------------------------------------------

fn flatten(nodes: &[TreeNode], depth: usize) -> Vec<(usize, &TreeNode)> {
    let mut out = Vec::new();
    for node in nodes {
        out.push((depth, node));
        if node.expanded {
            out.extend(flatten(&node.children, depth + 1));
        }
    }
    out
}

/// Set the `expanded` flag on the node with `id`. Returns `true` if found.
fn set_expanded(nodes: &mut [TreeNode], id: &str, expanded: bool) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            // Leaves have nothing to expand.
            if !node.children.is_empty() {
                node.expanded = expanded;
            }
            return true;
        }
        if set_expanded(&mut node.children, id, expanded) {
            return true;
        }
    }
    false
}

/// Flip the `expanded` flag on the node with `id`. Returns `true` if found.
fn toggle_expanded(nodes: &mut [TreeNode], id: &str) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            if !node.children.is_empty() {
                node.expanded = !node.expanded;
            }
            return true;
        }
        if toggle_expanded(&mut node.children, id) {
            return true;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CatalogTree<'a> {
    state: &'a CatalogTreeState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> CatalogTree<'a> {
    pub fn new(state: &'a CatalogTreeState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

impl Widget for CatalogTree<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title("Catalog").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .visible()
            .into_iter()
            .map(|(depth, node)| {
                let marker = if node.children.is_empty() {
                    "  "
                } else if node.expanded {
                    "▾ "
                } else {
                    "▸ "
                };
                let style = if node.target.is_none() {
                    self.theme.system_style(&node.id)
                } else {
                    Style::default()
                };
                let text = format!("{}{}{}", "  ".repeat(depth), marker, node.label);
                ListItem::new(Line::styled(text, style))
            })
            .collect();

        let mut list_state = ListState::default();
        if self.focused {
            list_state.select(Some(self.state.cursor));
        }
        StatefulWidget::render(
            List::new(items)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            inner,
            buf,
            &mut list_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use msdl_core::{Subtype, SystemEntry};
    use std::collections::BTreeMap;

    fn catalog() -> Catalog {
        let mut sys = SystemEntry::new("Windows 11");
        sys.subtypes.insert(
            "win11-24h2".to_string(),
            Subtype {
                title: Some("Windows 11 24H2".to_string()),
                ..Subtype::default()
            },
        );
        sys.subtypes.insert("win11-arm".to_string(), Subtype::default());
        let mut systems = BTreeMap::new();
        systems.insert("windows-11".to_string(), sys);
        Catalog::new(systems)
    }

    #[test]
    fn builds_expanded_two_level_tree() {
        let tree = CatalogTreeState::from_catalog(&catalog());
        let visible = tree.visible();
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].1.label, "Windows 11");
        // Titled leaf shows its title, untitled leaf its key.
        assert_eq!(visible[1].1.label, "Windows 11 24H2");
        assert_eq!(visible[2].1.label, "win11-arm");
    }

    #[test]
    fn collapse_hides_children_and_clamps_cursor() {
        let mut tree = CatalogTreeState::from_catalog(&catalog());
        tree.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(tree.visible().len(), 1);
        assert_eq!(tree.cursor, 0);
    }

    #[test]
    fn collapse_on_leaf_is_a_no_op() {
        let mut tree = CatalogTreeState::from_catalog(&catalog());
        tree.cursor = 1;
        tree.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(tree.visible().len(), 3, "leaves have nothing to collapse");
    }

    #[test]
    fn enter_toggles_system_nodes() {
        let mut tree = CatalogTreeState::from_catalog(&catalog());
        tree.handle(&AppEvent::Enter);
        assert_eq!(tree.visible().len(), 1);
        tree.handle(&AppEvent::Enter);
        assert_eq!(tree.visible().len(), 3);
    }

    #[test]
    fn selected_target_only_on_leaves() {
        let mut tree = CatalogTreeState::from_catalog(&catalog());
        assert_eq!(tree.selected_target(), None);
        tree.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(
            tree.selected_target(),
            Some(SubtypeRef::new("windows-11", "win11-24h2"))
        );
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut tree = CatalogTreeState::from_catalog(&catalog());
        for _ in 0..10 {
            tree.handle(&AppEvent::Nav(Direction::Down));
        }
        assert_eq!(tree.cursor, 2);
        tree.handle(&AppEvent::ScrollUp);
        assert_eq!(tree.cursor, 0);
    }
}
