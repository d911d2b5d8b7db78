//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_catalog;
mod edit;
mod explain;

pub use check_catalog::CheckCatalog;
pub use edit::Edit;
pub use explain::Explain;
