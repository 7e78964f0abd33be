pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod lockfile;
pub mod sync;
pub mod ui;
pub mod warning;

pub use error::{BumpkitError, Result};
