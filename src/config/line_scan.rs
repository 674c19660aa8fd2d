//! Line-Scan Reader
//!
//! Fallback used when YAML support is not compiled in (or is disabled
//! with `--line-scan`). Only two values are recoverable:
//!
//! - the top-level `analysis: <path>` entry of the main config
//! - `libraryTag: <tag>` from the analysis info
//!
//! Every other tag field and the whole analysis record stay empty. This
//! is enough for library-tag mode; joblist generation refuses to run on
//! this reader.

use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{AnalysisInfo, TagRecord};
use super::reader::{read_document, ConfigReader, ReaderKind};
use crate::error::Result;

/// Top-level `analysis: value`; the key must start the line.
static ANALYSIS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^analysis\s*:\s*(\S+)").expect("analysis pattern is valid"));

/// `libraryTag: value` at any indentation (it sits under `starTag:`).
static LIBRARY_TAG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*libraryTag\s*:\s*(\S+)").expect("libraryTag pattern is valid"));

/// Regex-based [`ConfigReader`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LineScanReader;

impl ConfigReader for LineScanReader {
    fn kind(&self) -> ReaderKind {
        ReaderKind::LineScan
    }

    fn analysis_reference(&self, main_conf: &Path) -> Result<Option<String>> {
        let content = read_document(main_conf)?;
        let found = first_match(&ANALYSIS_LINE, &content);
        debug!("Line scan of {}: analysis = {:?}", main_conf.display(), found);
        Ok(found)
    }

    fn tag_record(&self, path: &Path) -> Result<TagRecord> {
        let content = read_document(path)?;
        let tag = match first_match(&LIBRARY_TAG_LINE, &content) {
            Some(library_tag) => TagRecord::with_library_tag(library_tag),
            None => TagRecord::default(),
        };

        debug!("Line scan of {}: libraryTag = {:?}", path.display(), tag.library_tag);
        Ok(tag)
    }

    fn analysis_info(&self, path: &Path) -> Result<AnalysisInfo> {
        Ok(AnalysisInfo {
            tag: self.tag_record(path)?,
            analysis: Default::default(),
        })
    }
}

/// Captured value of the first matching line, trimmed and unquoted.
fn first_match(pattern: &Regex, content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| pattern.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| unquote(m.as_str().trim()).to_string())
}

/// Strips one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
