//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state and the keyboard event loop
//! - **[`panes`]**: stateless render functions for each visible pane (tree,
//!   console, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an
//! [`Inspector`] and the value to inspect, then call [`App::run`].
//!
//! [`Inspector`]: crate::inspector::Inspector
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
