//! The `restore` mode.

use std::path::Path;

use anyhow::Result;

use crate::archive;
use crate::collectors::Context;

/// Restore `package` into the backup root and replay editor extensions.
///
/// # Errors
///
/// Returns an error if the package is missing or cannot be extracted. Failed
/// extension installs are logged but do not fail the restore.
pub fn run(ctx: &Context, package: &Path) -> Result<()> {
    if !archive::restore(ctx, package) {
        anyhow::bail!("restore of {} failed", package.display());
    }
    Ok(())
}
