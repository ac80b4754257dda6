//! Stats command handler

use anyhow::Result;

use shelf_core::Library;

use crate::output::Output;

/// Show library statistics
pub fn show(library: &Library, top: usize, output: &Output) -> Result<()> {
    let stats = library.stats();
    output.print_stats(&stats, top);
    Ok(())
}
