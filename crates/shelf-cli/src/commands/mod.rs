pub mod book;
pub mod config;
pub mod stats;

use anyhow::{bail, Result};

/// Convert a 1-based position typed by the user to a library index
pub fn to_index(position: usize) -> Result<usize> {
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Positions start at 1"),
    }
}
