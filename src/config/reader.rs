//! Config Reader Capability
//!
//! Two interchangeable strategies read the main config and the analysis
//! info:
//!
//! - [`ReaderKind::Structured`]: full YAML parse (needs the `yaml` feature)
//! - [`ReaderKind::LineScan`]: regex line matching, recovers only the
//!   analysis path and `libraryTag`
//!
//! The strategy is picked once at startup with [`ReaderKind::detect`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::line_scan::LineScanReader;
use super::locator::{require_file, ProjectLayout};
use super::model::{AnalysisInfo, TagRecord};
use crate::error::{HelperError, Result};

/// Reads the two config documents.
pub trait ConfigReader {
    /// Which strategy this reader implements.
    fn kind(&self) -> ReaderKind;

    /// Returns the analysis-info path stored in the main config, relative
    /// to the config base.
    ///
    /// `Ok(None)` means the entry was not found and the caller decides
    /// how to report it.
    fn analysis_reference(&self, main_conf: &Path) -> Result<Option<String>>;

    /// Reads only the tag record; the analysis block is not looked at.
    fn tag_record(&self, path: &Path) -> Result<TagRecord>;

    /// Reads the tag and analysis records from an analysis-info file.
    fn analysis_info(&self, path: &Path) -> Result<AnalysisInfo>;
}

/// Available reading strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderKind {
    Structured,
    LineScan,
}

impl ReaderKind {
    /// Picks the structured reader when it is compiled in.
    pub fn detect() -> Self {
        if cfg!(feature = "yaml") {
            Self::Structured
        } else {
            Self::LineScan
        }
    }

    pub fn is_structured(self) -> bool {
        self == Self::Structured
    }

    /// Builds the reader for this strategy.
    pub fn reader(self) -> Result<Box<dyn ConfigReader>> {
        match self {
            Self::LineScan => Ok(Box::new(LineScanReader)),
            Self::Structured => structured_reader(),
        }
    }
}

impl fmt::Display for ReaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::LineScan => write!(f, "line-scan"),
        }
    }
}

#[cfg(feature = "yaml")]
fn structured_reader() -> Result<Box<dyn ConfigReader>> {
    Ok(Box::new(super::structured::YamlReader))
}

#[cfg(not(feature = "yaml"))]
fn structured_reader() -> Result<Box<dyn ConfigReader>> {
    Err(missing_yaml())
}

/// Error for operations that need the structured reader.
pub fn missing_yaml() -> HelperError {
    HelperError::MissingDependency(
        "YAML support is required. Rebuild with the `yaml` feature enabled".to_string(),
    )
}

/// Follows the main config to its analysis-info file.
///
/// Fails with `NotFound` when the entry is missing or the file it names
/// does not exist.
pub fn locate_analysis_info(
    reader: &dyn ConfigReader,
    layout: &ProjectLayout,
    main_conf: &Path,
) -> Result<PathBuf> {
    let reference = reader
        .analysis_reference(main_conf)?
        .ok_or_else(|| HelperError::not_found("'analysis' entry in mainconf", main_conf))?;

    let path = require_file("analysis info", layout.analysis_info_path(&reference))?;
    info!("Analysis info ({} reader): {}", reader.kind(), path.display());
    Ok(path)
}

/// Reads a config document into memory.
pub(crate) fn read_document(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|source| HelperError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} ({} bytes)", path.display(), content.len());
    Ok(content)
}
