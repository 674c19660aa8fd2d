//! Structured YAML Reader
//!
//! Full-fidelity reading of both config documents with `serde_yaml`.

use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_yaml::Value;

use super::model::{AnalysisInfo, TagRecord};
use super::reader::{read_document, ConfigReader, ReaderKind};
use crate::error::{HelperError, Result};

/// Main-config keys holding the analysis-info path, in lookup order.
const ANALYSIS_KEYS: &[&str] = &["analysis", "analysis info"];

/// [`ConfigReader`] backed by `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlReader;

impl ConfigReader for YamlReader {
    fn kind(&self) -> ReaderKind {
        ReaderKind::Structured
    }

    fn analysis_reference(&self, main_conf: &Path) -> Result<Option<String>> {
        let doc = load_yaml(main_conf)?;

        for key in ANALYSIS_KEYS {
            let Some(value) = doc.get(*key) else {
                continue;
            };

            match scalar_string(value) {
                Some(rel) if !rel.trim().is_empty() => {
                    if *key != "analysis" {
                        warn!("{}: using legacy key '{}'", main_conf.display(), key);
                    }
                    return Ok(Some(rel.trim().to_string()));
                }
                Some(_) => continue,
                None if value.is_null() => continue,
                None => {
                    return Err(HelperError::parse(
                        main_conf,
                        format!("'{}' must be a path string", key),
                    ))
                }
            }
        }

        Err(HelperError::MissingKey {
            key: "analysis",
            path: main_conf.to_path_buf(),
        })
    }

    fn tag_record(&self, path: &Path) -> Result<TagRecord> {
        let doc = load_yaml(path)?;
        record(path, star_tag_block(&doc), "starTag")
    }

    fn analysis_info(&self, path: &Path) -> Result<AnalysisInfo> {
        let doc = load_yaml(path)?;

        let tag = record(path, star_tag_block(&doc), "starTag")?;
        let analysis = record(path, doc.get("analysis"), "analysis")?;

        debug!("Parsed analysis info: {:?} / {:?}", tag, analysis);
        Ok(AnalysisInfo { tag, analysis })
    }
}

/// Parses a YAML file; an empty file is a null document.
fn load_yaml(path: &Path) -> Result<Value> {
    let content = read_document(path)?;
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_yaml::from_str(&content).map_err(|e| HelperError::parse(path, e))
}

/// Finds the tag block: `starTag`, then `startag`, then any casing.
fn star_tag_block(doc: &Value) -> Option<&Value> {
    let exact = ["starTag", "startag"]
        .iter()
        .filter_map(|key| doc.get(*key))
        .find(|value| !value.is_null());
    if exact.is_some() {
        return exact;
    }

    doc.as_mapping()?
        .iter()
        .find(|(key, value)| {
            key.as_str()
                .is_some_and(|k| k.eq_ignore_ascii_case("startag"))
                && !value.is_null()
        })
        .map(|(_, value)| value)
}

/// Deserializes an optional nested block; absent or null gives the default.
fn record<T>(path: &Path, block: Option<&Value>, name: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match block {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_yaml::from_value(value.clone())
            .map_err(|e| HelperError::parse(path, format!("'{}' block: {}", name, e))),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
