//! Core data model: filesystem access, directory listings and the
//! operations the browser performs

pub mod filesystem;
pub mod listing;
pub mod operation;
