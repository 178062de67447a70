//! Ratatui widgets for the msdl TUI.

pub mod catalog_tree;
pub mod command_bar;
pub mod detail;
pub mod help;
pub mod result_list;
pub mod search_bar;
pub mod title_bar;
