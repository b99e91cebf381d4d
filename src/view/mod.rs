//! View and UI layer
//!
//! Presentation state (prompt input, the destination folder tree) and the
//! renderers that draw it.

pub mod destination_tree;
pub mod prompt;
pub mod ui;
