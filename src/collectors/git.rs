//! Git config files and the configured identity.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Collector, CollectorResult, Context, Subtree};
use crate::config::tools::Category;

/// Git config files copied from the home directory.
const GIT_FILES: &[&str] = &[".gitconfig", ".gitignore_global"];

/// Name of the identity record inside the subtree.
pub const IDENTITY_FILE: &str = "user_info.json";

/// Global git identity, written only when both halves are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// `user.name`
    pub name: String,
    /// `user.email`
    pub email: String,
}

/// Back up global git config and identity.
#[derive(Debug)]
pub struct BackupGit;

impl Collector for BackupGit {
    fn name(&self) -> &'static str {
        "Git configuration"
    }

    fn category(&self) -> Category {
        Category::Git
    }

    fn run(&self, ctx: &Context) -> Result<CollectorResult> {
        let mut subtree = Subtree::new(ctx.backup_root(), self.category());

        for name in GIT_FILES {
            let path = ctx.home.join(name);
            if path.is_file() {
                subtree.copy_file(&path, name)?;
                ctx.log.debug(&format!("copied {name}"));
            }
        }

        if let Some(identity) = query_identity(ctx) {
            subtree.write(IDENTITY_FILE, serde_json::to_string_pretty(&identity)?)?;
            ctx.log
                .info(&format!("identity: {} <{}>", identity.name, identity.email));
        } else {
            ctx.log.debug("global identity incomplete, not recorded");
        }

        if subtree.written() == 0 {
            return Ok(CollectorResult::Skipped(
                "no git configuration found".to_string(),
            ));
        }
        ctx.log.success("Git configuration backed up");
        Ok(CollectorResult::Ok)
    }
}

/// Read `user.name` and `user.email`; `None` unless both queries succeed.
fn query_identity(ctx: &Context) -> Option<Identity> {
    let git = &ctx.commands().git;
    let name = ctx.executor.run(&format!("{git} config --global user.name"));
    let email = ctx.executor.run(&format!("{git} config --global user.email"));
    if !(name.success && email.success) {
        return None;
    }
    Some(Identity {
        name: name.stdout.trim().to_string(),
        email: email.stdout.trim().to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::collectors::test_helpers::{
        ScriptedExecutor, list_names, make_context, write_home_file,
    };
    use crate::platform::Os;

    const NAME_CMD: &str = "git config --global user.name";
    const EMAIL_CMD: &str = "git config --global user.email";

    #[test]
    fn identity_written_when_both_queries_succeed() {
        let home = tempfile::tempdir().unwrap();
        let exec = ScriptedExecutor::new()
            .ok(NAME_CMD, "Ada Lovelace\n")
            .ok(EMAIL_CMD, "ada@example.com\n");
        let ctx = make_context(home.path(), Os::Linux, exec);

        assert_eq!(BackupGit.run(&ctx).unwrap(), CollectorResult::Ok);

        let raw = std::fs::read_to_string(ctx.backup_root().join("git").join(IDENTITY_FILE))
            .unwrap();
        let identity: Identity = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            identity,
            Identity {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            }
        );
    }

    #[test]
    fn partial_identity_is_not_written() {
        let home = tempfile::tempdir().unwrap();
        write_home_file(home.path(), ".gitconfig", "[core]\n\teditor = vim\n");
        let exec = ScriptedExecutor::new()
            .ok(NAME_CMD, "Ada Lovelace\n")
            .fail(EMAIL_CMD, "");
        let ctx = make_context(home.path(), Os::Linux, exec);

        assert_eq!(BackupGit.run(&ctx).unwrap(), CollectorResult::Ok);
        assert_eq!(list_names(&ctx.backup_root().join("git")), [".gitconfig"]);
    }

    #[test]
    fn copies_allow_listed_files_only() {
        let home = tempfile::tempdir().unwrap();
        write_home_file(home.path(), ".gitconfig", "[user]\n");
        write_home_file(home.path(), ".gitignore_global", "target/\n");
        write_home_file(home.path(), ".git-credentials", "https://token@host\n");
        let ctx = make_context(home.path(), Os::Linux, ScriptedExecutor::new());

        BackupGit.run(&ctx).unwrap();
        assert_eq!(
            list_names(&ctx.backup_root().join("git")),
            [".gitconfig", ".gitignore_global"]
        );
    }

    #[test]
    fn nothing_captured_is_skipped() {
        let home = tempfile::tempdir().unwrap();
        let ctx = make_context(home.path(), Os::Linux, ScriptedExecutor::new());

        let result = BackupGit.run(&ctx).unwrap();
        assert!(matches!(result, CollectorResult::Skipped(_)));
        assert!(!ctx.backup_root().join("git").exists());
    }
}
