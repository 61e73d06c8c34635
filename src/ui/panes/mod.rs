//! TUI pane rendering modules
//!
//! Each pane module exports a primary `render_*` function plus any scroll
//! state it keeps between frames.
//!
//! - [`tokens`]: token stream with the cursor position
//! - [`stack`]: production stack, current event and entry counts
//! - [`tree`]: the most recently completed subtree
//! - [`status`]: status bar with keybindings and step counter

pub mod stack;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use stack::render_stack_pane;
pub use status::render_status_bar;
pub use tokens::{render_tokens_pane, TokenScrollState};
pub use tree::render_tree_pane;
