//! # Introduction
//!
//! XRay renders an arbitrary value as a collapsible, navigable tree: one row per
//! member, safe against circular references, with per-path expand/collapse
//! state and a node count for diagnostics.
//!
//! ## Pipeline
//!
//! ```text
//! Value → Inspector::render → TreeBuilder → DisplayNode tree → front end
//!                               │  ├─ classify       (category)
//!                               │  ├─ CycleDetector  (fresh / reentrant / circular)
//!                               │  └─ PathCollapseStore (prune or recurse)
//! ```
//!
//! 1. [`value`]: the inspectable value model; compound values are shared
//!    `Rc<RefCell<Object>>` allocations so aliases and cycles are expressible.
//! 2. [`inspector`]: the traversal engine and the [`inspector::Inspector`]
//!    component that keeps collapse state across passes.
//! 3. [`config`]: inspector options, deserializable from JSON.
//! 4. [`load`]: reading values and configuration from files.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Paths
//!
//! Every node is addressed by a path such as `$.users[0].name`. Paths are what
//! the collapse state is keyed by and what the user sees when revealing a node.

pub mod config;
pub mod demo;
pub mod inspector;
pub mod load;
pub mod ui;
pub mod value;
