use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read as _;
use std::path::Path;

use zip::ZipArchive;

use super::metadata::{METADATA_NAME, Metadata};
use super::packager::sha256_hex;
use crate::collectors::Context;
use crate::collectors::vscode::EXTENSIONS_FILE;
use crate::config::tools::Category;
use crate::error::ArchiveError;
use crate::logging::Log;

/// What an extraction wrote and found.
#[derive(Debug, Default)]
pub struct Extracted {
    /// Files written into the backup root.
    pub files: usize,
    /// Provenance record, when the archive carried a readable one.
    pub metadata: Option<Metadata>,
    /// Paths whose content does not match the recorded checksum.
    pub mismatched: Vec<String>,
}

/// Outcome of replaying the editor extension list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Replay {
    /// Install commands that succeeded.
    pub installed: usize,
    /// Install commands that failed.
    pub failed: usize,
}

/// Restore an archive into the backup root and replay post-restore actions.
///
/// Returns `false` (after logging the error) when the archive is missing or
/// cannot be read. Once extraction succeeds the result is `true`, even if
/// individual extension installs fail.
pub fn restore(ctx: &Context, archive: &Path) -> bool {
    ctx.log
        .stage(&format!("Restoring {}", archive.display()));
    let extracted = match extract(archive, ctx.backup_root(), ctx.log.as_ref()) {
        Ok(extracted) => extracted,
        Err(e) => {
            ctx.log.error(&e.to_string());
            return false;
        }
    };
    if let Some(meta) = &extracted.metadata {
        ctx.log.info(&format!(
            "package created {} on {} ({}) by {} {}",
            meta.created_at, meta.system, meta.machine, meta.creator, meta.devsync_version
        ));
    }
    ctx.log
        .success(&format!("{} files restored", extracted.files));

    let replay = replay_extensions(ctx);
    if replay.installed + replay.failed > 0 {
        ctx.log.info(&format!(
            "extensions: {} installed, {} failed",
            replay.installed, replay.failed
        ));
    }
    true
}

/// Extract every entry of `archive` into `backup_root`, overwriting files at
/// colliding paths.
///
/// The metadata entry is read, not written. Entries whose names would land
/// outside `backup_root` are skipped. Checksum mismatches are reported as
/// warnings and collected in [`Extracted::mismatched`].
///
/// # Errors
///
/// Returns [`ArchiveError::NotFound`] without touching the filesystem if
/// `archive` does not exist, and other variants if it cannot be read or an
/// entry cannot be written.
pub fn extract(archive: &Path, backup_root: &Path, log: &dyn Log) -> Result<Extracted, ArchiveError> {
    if !archive.is_file() {
        return Err(ArchiveError::NotFound(archive.to_path_buf()));
    }
    let file = File::open(archive).map_err(ArchiveError::io(archive))?;
    let mut zip = ZipArchive::new(file)?;
    std::fs::create_dir_all(backup_root).map_err(ArchiveError::io(backup_root))?;

    let mut extracted = Extracted::default();
    let mut actual = BTreeMap::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let name = entry.name().to_string();

        if name == METADATA_NAME {
            let mut raw = Vec::new();
            entry
                .read_to_end(&mut raw)
                .map_err(ArchiveError::io(archive))?;
            match serde_json::from_slice::<Metadata>(&raw) {
                Ok(meta) => extracted.metadata = Some(meta),
                Err(e) => log.warn(&format!("unreadable {METADATA_NAME}: {e}")),
            }
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            log.warn(&format!("skipping unsafe entry: {name}"));
            continue;
        };
        let target = backup_root.join(relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&target).map_err(ArchiveError::io(&target))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(ArchiveError::io(parent))?;
        }

        let mut data = Vec::new();
        entry
            .read_to_end(&mut data)
            .map_err(ArchiveError::io(archive))?;
        std::fs::write(&target, &data).map_err(ArchiveError::io(&target))?;
        log.debug(&format!("restored {name}"));
        actual.insert(name, sha256_hex(&data));
        extracted.files += 1;
    }

    if let Some(meta) = &extracted.metadata {
        for (name, expected) in &meta.checksums {
            if actual.get(name) != Some(expected) {
                log.warn(&format!("checksum mismatch: {name}"));
                extracted.mismatched.push(name.clone());
            }
        }
    }
    Ok(extracted)
}

/// Install every extension listed in the restored `extensions.txt`.
///
/// Each install is independent; a failure is logged and the next one runs.
/// Lines that are not a `publisher.name` identifier count as failures and
/// never reach the shell.
pub fn replay_extensions(ctx: &Context) -> Replay {
    let list = ctx
        .backup_root()
        .join(Category::VsCode.dir_name())
        .join(EXTENSIONS_FILE);
    let Ok(contents) = std::fs::read_to_string(&list) else {
        return Replay::default();
    };

    let mut replay = Replay::default();
    for extension in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !is_extension_id(extension) {
            ctx.log
                .warn(&format!("skipping invalid extension id: {extension}"));
            replay.failed += 1;
            continue;
        }
        let command = format!("{} --install-extension {extension}", ctx.commands().editor);
        let result = ctx.executor.run(&command);
        if result.success {
            ctx.log.debug(&format!("installed {extension}"));
            replay.installed += 1;
        } else {
            ctx.log.warn(&format!(
                "failed to install {extension}: {}",
                result.stderr.trim()
            ));
            replay.failed += 1;
        }
    }
    replay
}

/// Whether `id` looks like a marketplace identifier such as
/// `rust-lang.rust-analyzer`.
fn is_extension_id(id: &str) -> bool {
    let Some((publisher, name)) = id.split_once('.') else {
        return false;
    };
    !publisher.is_empty()
        && !name.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
