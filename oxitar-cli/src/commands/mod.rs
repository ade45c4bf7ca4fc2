//! Command implementations for OxiTar CLI.

pub mod cat;
pub mod info;

pub use cat::{CatOptions, cmd_cat};
pub use info::cmd_info;
