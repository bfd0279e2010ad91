//! Supported tools and the backup categories they map to.
use std::fmt;

/// A backup category: one subtree of the backup root, one collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Editor settings, snippets and extension list.
    VsCode,
    /// Global git config files and identity.
    Git,
    /// SSH config, known hosts and public keys.
    Ssh,
    /// Package manager inventories.
    Packages,
    /// Shell and editor dotfiles.
    Dotfiles,
}

impl Category {
    /// Every category in collection order.
    pub const ALL: [Self; 5] = [
        Self::VsCode,
        Self::Git,
        Self::Ssh,
        Self::Packages,
        Self::Dotfiles,
    ];

    /// Subdirectory name under the backup root.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::VsCode => "vscode",
            Self::Git => "git",
            Self::Ssh => "ssh",
            Self::Packages => "packages",
            Self::Dotfiles => "dotfiles",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A user-facing tool record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Stable key, e.g. `vscode`.
    pub key: &'static str,
    /// Human-readable description shown in prompts and status.
    pub description: &'static str,
    /// Category whose collector backs this tool up.
    pub category: Category,
}

/// Supported tools in prompt order.
///
/// `npm`, `pip` and `cargo` share the single packages collector.
pub const SUPPORTED_TOOLS: &[Tool] = &[
    Tool {
        key: "vscode",
        description: "Visual Studio Code Settings",
        category: Category::VsCode,
    },
    Tool {
        key: "git",
        description: "Git Configuration",
        category: Category::Git,
    },
    Tool {
        key: "ssh",
        description: "SSH Keys & Config",
        category: Category::Ssh,
    },
    Tool {
        key: "npm",
        description: "NPM Global Packages",
        category: Category::Packages,
    },
    Tool {
        key: "pip",
        description: "Python Packages",
        category: Category::Packages,
    },
    Tool {
        key: "cargo",
        description: "Rust Packages",
        category: Category::Packages,
    },
    Tool {
        key: "dotfiles",
        description: "Shell Configuration Files",
        category: Category::Dotfiles,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tool_keys_in_prompt_order() {
        let keys: Vec<&str> = SUPPORTED_TOOLS.iter().map(|t| t.key).collect();
        insta::assert_snapshot!(keys.join(","), @"vscode,git,ssh,npm,pip,cargo,dotfiles");
    }

    #[test]
    fn tool_keys_are_unique() {
        let keys: HashSet<&str> = SUPPORTED_TOOLS.iter().map(|t| t.key).collect();
        assert_eq!(keys.len(), SUPPORTED_TOOLS.len());
    }

    #[test]
    fn every_category_has_a_tool() {
        for category in Category::ALL {
            assert!(
                SUPPORTED_TOOLS.iter().any(|t| t.category == category),
                "no tool maps to {category}"
            );
        }
    }

    #[test]
    fn package_tools_share_category() {
        let keys: Vec<&str> = SUPPORTED_TOOLS
            .iter()
            .filter(|t| t.category == Category::Packages)
            .map(|t| t.key)
            .collect();
        assert_eq!(keys, ["npm", "pip", "cargo"]);
    }

    #[test]
    fn category_dir_names() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.dir_name()).collect();
        assert_eq!(names, ["vscode", "git", "ssh", "packages", "dotfiles"]);
    }
}
