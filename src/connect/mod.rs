//! Repository acquisition: delivers a local directory tree to parse.

use std::fmt;
use std::fs;
use std::path::Path;

use git2::build::RepoBuilder;
use serde::{Deserialize, Serialize};
use tracing::info;
use walkdir::WalkDir;

use crate::error::Result;
use crate::scan::{ExcludeMatcher, ExcludeRules};

/// How the project tree is delivered before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectMethod {
    /// Clone the repository at the configured URL.
    GitClone,
    /// Copy a single local file into the target directory.
    DryRunFile,
    /// Copy a local directory tree into the target directory, skipping the
    /// default-excluded directories.
    DryRunDir,
}

/// Common interface to pull a project from different sources.
pub struct Connect {
    method: ConnectMethod,
    project_dir_name: String,
    url: String,
    branch: Option<String>,
}

impl Connect {
    /// `url` is a git URL for [`ConnectMethod::GitClone`] and a local path
    /// for the dry-run methods. `branch` only applies to cloning.
    pub fn new(
        method: ConnectMethod,
        project_dir_name: impl Into<String>,
        url: impl Into<String>,
        branch: Option<String>,
    ) -> Self {
        Self {
            method,
            project_dir_name: project_dir_name.into(),
            url: url.into(),
            branch,
        }
    }

    pub fn project_dir_name(&self) -> &str {
        &self.project_dir_name
    }

    /// Pulls the repository (or local file/tree) into `target_dir`.
    pub fn pull_repository(&self, target_dir: &Path) -> Result<()> {
        info!(project = %self.project_dir_name, method = ?self.method, "pulling repository");
        match self.method {
            ConnectMethod::GitClone => self.clone_repository(target_dir),
            ConnectMethod::DryRunFile => self.copy_file(target_dir),
            ConnectMethod::DryRunDir => self.copy_tree(target_dir),
        }
    }

    fn clone_repository(&self, target_dir: &Path) -> Result<()> {
        let mut builder = RepoBuilder::new();
        if let Some(branch) = &self.branch {
            builder.branch(branch);
        }
        builder.clone(&self.url, target_dir)?;
        Ok(())
    }

    fn copy_file(&self, target_dir: &Path) -> Result<()> {
        fs::create_dir_all(target_dir)?;
        let source = Path::new(&self.url);
        let file_name = source
            .file_name()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"))?;
        fs::copy(source, target_dir.join(file_name))?;
        Ok(())
    }

    fn copy_tree(&self, target_dir: &Path) -> Result<()> {
        let source = Path::new(&self.url);
        let skip_dirs = ExcludeMatcher::new(&ExcludeRules::default_dirs())?;

        for entry in WalkDir::new(source).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !skip_dirs.is_excluded(entry.path())
        }) {
            let entry = entry.map_err(std::io::Error::from)?;
            let relative = match entry.path().strip_prefix(source) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            let destination = target_dir.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&destination)?;
            } else {
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &destination)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Connect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "connect_method: {:?} project_dir_name: {} url: {}",
            self.method, self.project_dir_name, self.url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dry_run_file_copies_into_target() {
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("single.py");
        fs::write(&source, "# TODO lone file\n").unwrap();

        let target = tempfile::tempdir().unwrap();
        let connect = Connect::new(
            ConnectMethod::DryRunFile,
            "proj",
            source.to_string_lossy(),
            None,
        );
        connect.pull_repository(target.path()).unwrap();

        let copied = target.path().join("single.py");
        assert_eq!(fs::read_to_string(copied).unwrap(), "# TODO lone file\n");
    }

    #[test]
    fn dry_run_dir_copies_tree_and_skips_default_dirs() {
        let source = tempfile::tempdir().unwrap();
        fs::create_dir_all(source.path().join("pkg")).unwrap();
        fs::write(source.path().join("pkg/a.py"), "# TODO a\n").unwrap();
        fs::create_dir_all(source.path().join("__pycache__")).unwrap();
        fs::write(source.path().join("__pycache__/a.pyc"), "junk").unwrap();

        let target = tempfile::tempdir().unwrap();
        let destination = target.path().join("proj");
        let connect = Connect::new(
            ConnectMethod::DryRunDir,
            "proj",
            source.path().to_string_lossy(),
            None,
        );
        connect.pull_repository(&destination).unwrap();

        assert!(destination.join("pkg/a.py").exists());
        assert!(!destination.join("__pycache__").exists());
    }
}
