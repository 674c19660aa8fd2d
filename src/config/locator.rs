//! Config Locator
//!
//! Resolves config references against the project root and derives the
//! directories everything else is read from or written to.
//!
//! # Project Layout
//!
//! ```text
//! {root}/
//!   config/                          # base for analysis-info paths
//!     mainconf/main_*.yaml
//!   job/joblist/
//!     job_template_from_conf.xml     # template
//!     joblist_{baseRunMacro}.xml     # rendered output
//!   bin/analysis-info-helper         # default root is the parent of this dir
//! ```

use std::env;
use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;

use crate::error::{HelperError, Result};

/// Main config used by library-tag mode when none is given.
pub const DEFAULT_MAINCONF: &str = "config/mainconf/main_auau19_anaLambda.yaml";

/// Template file name inside the joblist directory.
pub const TEMPLATE_FILE: &str = "job_template_from_conf.xml";

/// Default project root: the parent of the directory holding the executable.
///
/// Falls back to the current directory when the executable location
/// cannot be determined.
pub static DEFAULT_PROJECT_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    let root = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    debug!("Default project root: {}", root.display());
    root
});

/// Directory layout derived from a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    config_base: PathBuf,
}

impl ProjectLayout {
    /// Creates a layout rooted at `root`.
    ///
    /// A relative root is made absolute against the current directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = absolutize(root.as_ref());
        let config_base = root.join("config");
        Self { root, config_base }
    }

    /// Layout rooted at [`DEFAULT_PROJECT_ROOT`].
    pub fn from_default_root() -> Self {
        Self::new(&*DEFAULT_PROJECT_ROOT)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn joblist_dir(&self) -> PathBuf {
        self.root.join("job").join("joblist")
    }

    pub fn template_path(&self) -> PathBuf {
        self.joblist_dir().join(TEMPLATE_FILE)
    }

    /// Resolves a main-config reference to an existing file.
    ///
    /// Absolute references are used as-is, relative ones are joined
    /// with the project root.
    pub fn resolve_main_config(&self, reference: &str) -> Result<PathBuf> {
        let path = self.join_root(reference);
        require_file("mainconf", path)
    }

    /// Joins a path taken from the main config with the config base.
    ///
    /// Existence is not checked here; the caller decides how a missing
    /// file is reported.
    pub fn analysis_info_path(&self, relative: &str) -> PathBuf {
        self.config_base.join(relative.trim())
    }

    /// The invocation's main-config path as seen from the project root.
    ///
    /// Relative references are kept verbatim. Absolute ones are made
    /// relative to the root when they lie inside it.
    pub fn relative_to_root(&self, reference: &str) -> String {
        let path = Path::new(reference);
        if !path.is_absolute() {
            return reference.to_string();
        }

        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_string_lossy().into_owned(),
            Err(_) => reference.to_string(),
        }
    }

    fn join_root(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Fails with `NotFound` unless `path` names an existing regular file.
pub fn require_file(what: &'static str, path: PathBuf) -> Result<PathBuf> {
    if path.is_file() {
        debug!("Resolved {}: {}", what, path.display());
        Ok(path)
    } else {
        Err(HelperError::not_found(what, path))
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_layout_directories() {
        let layout = ProjectLayout::new("/star/u/me/analyzer");

        assert_eq!(layout.root(), Path::new("/star/u/me/analyzer"));
        assert_eq!(
            layout.analysis_info_path("analysis/a.yaml"),
            PathBuf::from("/star/u/me/analyzer/config/analysis/a.yaml")
        );
        assert_eq!(
            layout.template_path(),
            PathBuf::from("/star/u/me/analyzer/job/joblist/job_template_from_conf.xml")
        );
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let layout = ProjectLayout::new("some/root");
        assert!(layout.root().is_absolute());
        assert!(layout.root().ends_with("some/root"));
    }

    #[test]
    fn test_resolve_relative_main_config() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config/mainconf")).unwrap();
        fs::write(dir.path().join("config/mainconf/main.yaml"), "analysis: a.yaml\n").unwrap();

        let layout = ProjectLayout::new(dir.path());
        let path = layout.resolve_main_config("config/mainconf/main.yaml").unwrap();

        assert_eq!(path, dir.path().join("config/mainconf/main.yaml"));
    }

    #[test]
    fn test_resolve_absolute_main_config() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("elsewhere.yaml");
        fs::write(&file, "analysis: a.yaml\n").unwrap();

        let layout = ProjectLayout::new("/nonexistent/root");
        let path = layout.resolve_main_config(file.to_str().unwrap()).unwrap();

        assert_eq!(path, file);
    }

    #[test]
    fn test_resolve_missing_main_config() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());

        let err = layout.resolve_main_config("config/missing.yaml").unwrap_err();
        match err {
            HelperError::NotFound { what, path } => {
                assert_eq!(what, "mainconf");
                assert_eq!(path, dir.path().join("config/missing.yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();

        let layout = ProjectLayout::new(dir.path());
        assert!(layout.resolve_main_config("config").is_err());
    }

    #[test]
    fn test_analysis_info_path_trims() {
        let layout = ProjectLayout::new("/root");
        assert_eq!(
            layout.analysis_info_path("  analysis/auau19.yaml "),
            PathBuf::from("/root/config/analysis/auau19.yaml")
        );
    }

    #[test]
    fn test_relative_to_root() {
        let layout = ProjectLayout::new("/proj");

        assert_eq!(layout.relative_to_root("mainconf/a.yaml"), "mainconf/a.yaml");
        assert_eq!(
            layout.relative_to_root("/proj/config/mainconf/a.yaml"),
            "config/mainconf/a.yaml"
        );
        assert_eq!(layout.relative_to_root("/other/a.yaml"), "/other/a.yaml");
    }
}
