//! Shell and editor dotfiles from the home directory.

use anyhow::Result;

use super::{Collector, CollectorResult, Context, Subtree};
use crate::config::tools::Category;

/// Shell and editor config files looked up in the home directory.
pub const DOTFILES: &[&str] = &[
    ".bashrc",
    ".bash_profile",
    ".zshrc",
    ".zprofile",
    ".fish_config",
    ".profile",
    ".aliases",
    ".functions",
    ".vimrc",
    ".tmux.conf",
    ".screenrc",
];

/// Back up shell dotfiles.
#[derive(Debug)]
pub struct BackupDotfiles;

impl Collector for BackupDotfiles {
    fn name(&self) -> &'static str {
        "dotfiles"
    }

    fn category(&self) -> Category {
        Category::Dotfiles
    }

    fn run(&self, ctx: &Context) -> Result<CollectorResult> {
        let mut subtree = Subtree::new(ctx.backup_root(), self.category());
        for name in DOTFILES {
            let path = ctx.home.join(name);
            if path.is_file() {
                subtree.copy_file(&path, name)?;
                ctx.log.debug(&format!("copied {name}"));
            }
        }
        ctx.log
            .success(&format!("{} dotfiles backed up", subtree.written()));
        Ok(CollectorResult::Ok)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::collectors::test_helpers::{
        ScriptedExecutor, list_names, make_context, write_home_file,
    };
    use crate::platform::Os;

    #[test]
    fn copies_known_dotfiles_present() {
        let home = tempfile::tempdir().unwrap();
        write_home_file(home.path(), ".bashrc", "export EDITOR=vim\n");
        write_home_file(home.path(), ".vimrc", "set nu\n");
        write_home_file(home.path(), ".netrc", "machine example.com\n");
        let ctx = make_context(home.path(), Os::Linux, ScriptedExecutor::new());

        assert_eq!(BackupDotfiles.run(&ctx).unwrap(), CollectorResult::Ok);
        assert_eq!(
            list_names(&ctx.backup_root().join("dotfiles")),
            [".bashrc", ".vimrc"]
        );
    }

    #[test]
    fn zero_dotfiles_still_succeeds() {
        let home = tempfile::tempdir().unwrap();
        let ctx = make_context(home.path(), Os::Linux, ScriptedExecutor::new());
        assert_eq!(BackupDotfiles.run(&ctx).unwrap(), CollectorResult::Ok);
        assert!(!ctx.backup_root().join("dotfiles").exists());
    }

    #[test]
    fn directories_with_dotfile_names_are_ignored() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join(".profile")).unwrap();
        let ctx = make_context(home.path(), Os::Linux, ScriptedExecutor::new());
        BackupDotfiles.run(&ctx).unwrap();
        assert!(!ctx.backup_root().join("dotfiles").exists());
    }
}
