pub mod boundary;
pub mod bump;
pub mod ci;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod push;
pub mod ui;

pub use error::{BumpError, Result};
