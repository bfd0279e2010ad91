use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use sha2::{Digest as _, Sha256};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::metadata::{METADATA_NAME, Metadata};
use crate::collectors::Context;
use crate::error::ArchiveError;

/// Timestamp format embedded in default package names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Package the whole backup root into one zip archive.
///
/// Without a `destination`, the archive is written to the state directory as
/// `devsync_backup_<YYYYMMDD_HHMMSS>.zip`. Files are stored under their path
/// relative to the backup root, followed by a final `metadata.json` entry.
/// An existing file at the target path is never replaced.
///
/// # Errors
///
/// Returns [`ArchiveError::Exists`] if the target path is taken, and other
/// variants if the backup root cannot be walked or read, or the archive
/// cannot be written.
pub fn package(ctx: &Context, destination: Option<&Path>) -> Result<PathBuf, ArchiveError> {
    package_at(ctx, destination, &Local::now())
}

fn package_at(
    ctx: &Context,
    destination: Option<&Path>,
    now: &DateTime<Local>,
) -> Result<PathBuf, ArchiveError> {
    let root = ctx.backup_root();
    std::fs::create_dir_all(root).map_err(ArchiveError::io(root))?;

    let path = destination.map_or_else(
        || {
            ctx.layout()
                .package_path(&now.format(TIMESTAMP_FORMAT).to_string())
        },
        Path::to_path_buf,
    );
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(ArchiveError::io(parent))?;
    }

    let file = File::create_new(&path).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            ArchiveError::Exists(path.clone())
        } else {
            ArchiveError::io(&path)(e)
        }
    })?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut checksums = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = archive_name(root, entry.path()) else {
            continue;
        };
        if name == METADATA_NAME {
            ctx.log.warn(&format!(
                "skipping {} in backup root: name is reserved",
                entry.path().display()
            ));
            continue;
        }

        let data = std::fs::read(entry.path()).map_err(ArchiveError::io(entry.path()))?;
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&data).map_err(ArchiveError::io(&path))?;
        ctx.log.debug(&format!("added {name}"));
        checksums.insert(name, sha256_hex(&data));
    }

    let file_count = checksums.len();
    let metadata = Metadata::new(now, &ctx.platform, checksums);
    zip.start_file(METADATA_NAME, options)?;
    zip.write_all(&serde_json::to_vec_pretty(&metadata)?)
        .map_err(ArchiveError::io(&path))?;
    zip.finish()?;

    ctx.log
        .info(&format!("{file_count} files packaged into {}", path.display()));
    Ok(path)
}

/// `/`-separated path of `path` relative to `root`.
fn archive_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Lowercase hex SHA-256 of `data`.
pub(super) fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
