//! Command implementations.
//!
//! Each command opens one session (seeded or imported), dispatches the
//! actions it needs, and renders the resulting frame.

pub mod add;
pub mod completions;
pub mod edit;
pub mod export;
pub mod list;
pub mod session;
pub mod stats;
pub mod version;
