//! Analysis Info Data Model
//!
//! Records read from the analysis-info document.
//!
//! # Example YAML Format
//!
//! ```yaml
//! starTag:
//!   libraryTag: SL24y
//!   triggerSets: production_19GeV_2019
//!   productionTag: P24ia
//!   filetype: daq_reco_picoDst
//!   filenameFilter: st_physics
//!   storageExclude: hpss
//!
//! analysis:
//!   baseRunMacro: run_anaLambda
//!   baseAnaMacro: anaLambda
//!   anaName: auau19_anaLambda
//!   nFiles: 40
//!   workDir: /star/u/$USER/star-analyzer
//! ```

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Library version and data-catalog query fragments (`starTag` block).
///
/// Every field is optional. Absent fields are left out of the catalog
/// URL rather than rendered empty.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TagRecord {
    #[serde(deserialize_with = "optional_scalar")]
    pub library_tag: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub trigger_sets: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub production_tag: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub filetype: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub filename_filter: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub storage_exclude: Option<String>,
}

/// Job metadata (`analysis` block).
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Run macro name without the `.C` suffix
    #[serde(deserialize_with = "optional_scalar")]
    pub base_run_macro: Option<String>,

    /// Analysis library prefix
    #[serde(deserialize_with = "optional_scalar")]
    pub base_ana_macro: Option<String>,

    /// Main config path passed to the job, relative to `config/`
    #[serde(deserialize_with = "optional_scalar")]
    pub main_conf: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub ana_name: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub name: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub job_name: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub scratch_subdir: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub output_file_stem: Option<String>,

    /// Number of input files per job; integers are kept in decimal form
    #[serde(deserialize_with = "optional_scalar")]
    pub n_files: Option<String>,

    #[serde(deserialize_with = "optional_scalar")]
    pub work_dir: Option<String>,
}

/// Both records of an analysis-info document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisInfo {
    pub tag: TagRecord,
    pub analysis: AnalysisRecord,
}

impl TagRecord {
    /// Record carrying only a library tag (what line scanning recovers).
    pub fn with_library_tag(tag: impl Into<String>) -> Self {
        Self {
            library_tag: Some(tag.into()),
            ..Self::default()
        }
    }
}

/// Returns the value when it is present and not an empty string.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Deserializes any YAML scalar into its string form; `null` is absent.
fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = Value::deserialize(deserializer)?;
    match val {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(de::Error::custom("expected a scalar value")),
    }
}
