//! Field Merger
//!
//! Combines the analysis and tag records with their defaults into the
//! flat placeholder -> value map the renderer consumes.
//!
//! Most placeholders come from [`FIELD_RULES`], a table of lookup chains:
//! the first record field that is present and non-empty wins, otherwise
//! the default applies. `STARVER`, `CATALOG_URL` and `MAINCONF` have
//! their own sources.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use log::debug;

use super::catalog::build_catalog_url;
use crate::config::model::{non_empty, AnalysisInfo, AnalysisRecord};

/// Library tag used when the tag record has none.
pub const DEFAULT_LIBRARY_TAG: &str = "SL24y";

/// Analysis name used when neither `anaName` nor `name` is set.
pub const DEFAULT_ANA_NAME: &str = "auau19_anaLambda_temp";

/// Run macro base name used when `baseRunMacro` is not set.
pub const DEFAULT_BASE_RUN_MACRO: &str = "run_anaLambda";

/// `MAINCONF` fallback, relative to `config/`.
pub const DEFAULT_MAIN_CONF: &str = "mainconf/main_auau19_anaLambda.yaml";

/// Placeholders understood by the renderer, in substitution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    JobName,
    RunMacro,
    StarVer,
    ScratchSubdir,
    OutputFileStem,
    MainConf,
    WorkDir,
    CatalogUrl,
    NFiles,
    AnaSoPrefix,
}

impl Placeholder {
    pub const ALL: [Placeholder; 10] = [
        Self::JobName,
        Self::RunMacro,
        Self::StarVer,
        Self::ScratchSubdir,
        Self::OutputFileStem,
        Self::MainConf,
        Self::WorkDir,
        Self::CatalogUrl,
        Self::NFiles,
        Self::AnaSoPrefix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::JobName => "JOB_NAME",
            Self::RunMacro => "RUN_MACRO",
            Self::StarVer => "STARVER",
            Self::ScratchSubdir => "SCRATCH_SUBDIR",
            Self::OutputFileStem => "OUTPUT_FILE_STEM",
            Self::MainConf => "MAINCONF",
            Self::WorkDir => "WORK_DIR",
            Self::CatalogUrl => "CATALOG_URL",
            Self::NFiles => "N_FILES",
            Self::AnaSoPrefix => "ANA_SO_PREFIX",
        }
    }

    /// Token as it appears in the template, e.g. `__JOB_NAME__`.
    pub fn token(self) -> String {
        format!("__{}__", self.name())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keys of the analysis record that take part in lookup chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisField {
    BaseRunMacro,
    BaseAnaMacro,
    AnaName,
    Name,
    JobName,
    ScratchSubdir,
    OutputFileStem,
    NFiles,
    WorkDir,
}

impl AnalysisField {
    /// The field's value when present and non-empty.
    pub fn value(self, record: &AnalysisRecord) -> Option<&str> {
        let raw = match self {
            Self::BaseRunMacro => &record.base_run_macro,
            Self::BaseAnaMacro => &record.base_ana_macro,
            Self::AnaName => &record.ana_name,
            Self::Name => &record.name,
            Self::JobName => &record.job_name,
            Self::ScratchSubdir => &record.scratch_subdir,
            Self::OutputFileStem => &record.output_file_stem,
            Self::NFiles => &record.n_files,
            Self::WorkDir => &record.work_dir,
        };
        non_empty(raw)
    }
}

/// One placeholder resolved from an analysis-record lookup chain.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub placeholder: Placeholder,
    pub chain: &'static [AnalysisField],
    pub default: &'static str,
    pub suffix: &'static str,
}

impl FieldRule {
    /// Resolves the chain left to right, falling back to the default.
    pub fn resolve(&self, record: &AnalysisRecord) -> String {
        let base = self
            .chain
            .iter()
            .find_map(|field| field.value(record))
            .unwrap_or(self.default);
        format!("{}{}", base, self.suffix)
    }
}

use AnalysisField as F;

const RUN_MACRO_CHAIN: &[AnalysisField] = &[F::BaseRunMacro];

/// Lookup chains for the record-derived placeholders.
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        placeholder: Placeholder::JobName,
        chain: &[F::JobName, F::AnaName, F::Name],
        default: DEFAULT_ANA_NAME,
        suffix: "",
    },
    FieldRule {
        placeholder: Placeholder::RunMacro,
        chain: RUN_MACRO_CHAIN,
        default: DEFAULT_BASE_RUN_MACRO,
        suffix: ".C",
    },
    FieldRule {
        placeholder: Placeholder::ScratchSubdir,
        chain: &[F::ScratchSubdir, F::AnaName, F::Name],
        default: DEFAULT_ANA_NAME,
        suffix: "",
    },
    FieldRule {
        placeholder: Placeholder::OutputFileStem,
        chain: &[F::OutputFileStem, F::AnaName, F::Name],
        default: DEFAULT_ANA_NAME,
        suffix: "",
    },
    FieldRule {
        placeholder: Placeholder::WorkDir,
        chain: &[F::WorkDir],
        default: "/star/u/$USER/Path/To/star-analyzer",
        suffix: "",
    },
    FieldRule {
        placeholder: Placeholder::NFiles,
        chain: &[F::NFiles],
        default: "40",
        suffix: "",
    },
    FieldRule {
        placeholder: Placeholder::AnaSoPrefix,
        chain: &[F::BaseAnaMacro],
        default: "anaLambda",
        suffix: "",
    },
];

/// Base name of the run macro, without the `.C` suffix.
pub fn base_run_macro(record: &AnalysisRecord) -> &str {
    RUN_MACRO_CHAIN
        .iter()
        .find_map(|field| field.value(record))
        .unwrap_or(DEFAULT_BASE_RUN_MACRO)
}

/// Output file name for a record: `joblist_<baseRunMacro>.xml`.
pub fn joblist_file_name(record: &AnalysisRecord) -> String {
    format!("joblist_{}.xml", base_run_macro(record))
}

/// Flat placeholder -> value map, built once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    values: BTreeMap<Placeholder, String>,
}

impl SubstitutionMap {
    /// Merges records and defaults into a complete map.
    ///
    /// `invocation_main_conf` is the main-config path the helper was run
    /// with, relative to the project root. It is used for `MAINCONF` when
    /// the record has no `mainConf`.
    pub fn build(info: &AnalysisInfo, invocation_main_conf: Option<&str>) -> Self {
        let mut values = BTreeMap::new();

        for rule in FIELD_RULES {
            values.insert(rule.placeholder, rule.resolve(&info.analysis));
        }

        let starver = non_empty(&info.tag.library_tag).unwrap_or(DEFAULT_LIBRARY_TAG);
        values.insert(Placeholder::StarVer, starver.to_string());
        values.insert(Placeholder::CatalogUrl, build_catalog_url(&info.tag));

        let main_conf = non_empty(&info.analysis.main_conf)
            .or(invocation_main_conf.filter(|s| !s.trim().is_empty()))
            .unwrap_or(DEFAULT_MAIN_CONF);
        values.insert(Placeholder::MainConf, with_config_prefix(main_conf.trim()));

        for (placeholder, value) in &values {
            debug!("{} = {}", placeholder, value);
        }

        Self { values }
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }
}

/// Prefixes `config/` unless already present or the path is absolute.
fn with_config_prefix(path: &str) -> String {
    if path.starts_with("config/") || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        format!("config/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::TagRecord;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_defaults_for_empty_records() {
        let map = SubstitutionMap::build(&AnalysisInfo::default(), None);

        assert!(Placeholder::ALL.iter().all(|p| map.get(*p).is_some()));
        assert_eq!(map.get(Placeholder::JobName), Some("auau19_anaLambda_temp"));
        assert_eq!(map.get(Placeholder::RunMacro), Some("run_anaLambda.C"));
        assert_eq!(map.get(Placeholder::StarVer), Some("SL24y"));
        assert_eq!(map.get(Placeholder::ScratchSubdir), Some("auau19_anaLambda_temp"));
        assert_eq!(map.get(Placeholder::OutputFileStem), Some("auau19_anaLambda_temp"));
        assert_eq!(
            map.get(Placeholder::MainConf),
            Some("config/mainconf/main_auau19_anaLambda.yaml")
        );
        assert_eq!(
            map.get(Placeholder::WorkDir),
            Some("/star/u/$USER/Path/To/star-analyzer")
        );
        assert_eq!(map.get(Placeholder::CatalogUrl), Some("catalog:star.bnl.gov?"));
        assert_eq!(map.get(Placeholder::NFiles), Some("40"));
        assert_eq!(map.get(Placeholder::AnaSoPrefix), Some("anaLambda"));
    }

    #[test]
    fn test_job_name_chain() {
        let mut analysis = AnalysisRecord {
            name: some("from_name"),
            ..Default::default()
        };
        let rule = &FIELD_RULES[0];
        assert_eq!(rule.placeholder, Placeholder::JobName);
        assert_eq!(rule.resolve(&analysis), "from_name");

        analysis.ana_name = some("from_ana_name");
        assert_eq!(rule.resolve(&analysis), "from_ana_name");

        analysis.job_name = some("from_job_name");
        assert_eq!(rule.resolve(&analysis), "from_job_name");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let analysis = AnalysisRecord {
            job_name: some(""),
            ana_name: some("auau19_anaPhi"),
            base_run_macro: some(""),
            ..Default::default()
        };
        let info = AnalysisInfo {
            analysis,
            ..Default::default()
        };
        let map = SubstitutionMap::build(&info, None);

        assert_eq!(map.get(Placeholder::JobName), Some("auau19_anaPhi"));
        assert_eq!(map.get(Placeholder::ScratchSubdir), Some("auau19_anaPhi"));
        assert_eq!(map.get(Placeholder::RunMacro), Some("run_anaLambda.C"));
    }

    #[test]
    fn test_record_values() {
        let info = AnalysisInfo {
            tag: TagRecord {
                library_tag: some("SL25a"),
                trigger_sets: some("T"),
                ..Default::default()
            },
            analysis: AnalysisRecord {
                base_run_macro: some("run_anaPhi"),
                base_ana_macro: some("anaPhi"),
                ana_name: some("auau19_anaPhi"),
                scratch_subdir: some("phi_scratch"),
                output_file_stem: some("phi_out"),
                n_files: some("12"),
                work_dir: some("/star/u/me/analyzer"),
                ..Default::default()
            },
        };
        let map = SubstitutionMap::build(&info, None);

        assert_eq!(map.get(Placeholder::JobName), Some("auau19_anaPhi"));
        assert_eq!(map.get(Placeholder::RunMacro), Some("run_anaPhi.C"));
        assert_eq!(map.get(Placeholder::StarVer), Some("SL25a"));
        assert_eq!(map.get(Placeholder::ScratchSubdir), Some("phi_scratch"));
        assert_eq!(map.get(Placeholder::OutputFileStem), Some("phi_out"));
        assert_eq!(map.get(Placeholder::NFiles), Some("12"));
        assert_eq!(map.get(Placeholder::AnaSoPrefix), Some("anaPhi"));
        assert_eq!(map.get(Placeholder::CatalogUrl), Some("catalog:star.bnl.gov?trgsetupname=T"));
    }

    #[test]
    fn test_main_conf_sources() {
        let mut info = AnalysisInfo::default();

        let map = SubstitutionMap::build(&info, Some("mainconf/main_phi.yaml"));
        assert_eq!(map.get(Placeholder::MainConf), Some("config/mainconf/main_phi.yaml"));

        let map = SubstitutionMap::build(&info, Some("config/mainconf/main_phi.yaml"));
        assert_eq!(map.get(Placeholder::MainConf), Some("config/mainconf/main_phi.yaml"));

        info.analysis.main_conf = some("mainconf/from_record.yaml");
        let map = SubstitutionMap::build(&info, Some("config/mainconf/main_phi.yaml"));
        assert_eq!(map.get(Placeholder::MainConf), Some("config/mainconf/from_record.yaml"));
    }

    #[test]
    fn test_joblist_file_name() {
        assert_eq!(joblist_file_name(&AnalysisRecord::default()), "joblist_run_anaLambda.xml");

        let analysis = AnalysisRecord {
            base_run_macro: some("run_anaPhi"),
            ..Default::default()
        };
        assert_eq!(joblist_file_name(&analysis), "joblist_run_anaPhi.xml");
    }

    #[test]
    fn test_placeholder_tokens() {
        assert_eq!(Placeholder::StarVer.token(), "__STARVER__");
        assert_eq!(Placeholder::AnaSoPrefix.token(), "__ANA_SO_PREFIX__");
    }

    #[test]
    fn test_with_config_prefix() {
        assert_eq!(with_config_prefix("mainconf/a.yaml"), "config/mainconf/a.yaml");
        assert_eq!(with_config_prefix("config/mainconf/a.yaml"), "config/mainconf/a.yaml");
        assert_eq!(with_config_prefix("/abs/a.yaml"), "/abs/a.yaml");
    }
}
