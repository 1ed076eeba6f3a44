//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tree`]: the inspected value as a collapsible tree
//! - [`console`]: the diagnostic channel (configuration problems, dumps)
//! - [`status`]: status bar with keybindings and the selected row
//! - `utils`: flattening the display tree and styling values
//!
//! Each pane module exports a primary `render_*` function; panes are stateless
//! apart from the scroll state passed in.

pub(crate) mod utils;

pub mod console;
pub mod status;
pub mod tree;

pub use console::render_console_pane;
pub use status::render_status_bar;
pub use tree::{render_tree_pane, TreeRenderData, TreeScrollState};
