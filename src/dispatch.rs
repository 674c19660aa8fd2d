//! Mode Dispatcher
//!
//! Runs one invocation end to end:
//!
//! ```text
//! START ─┬─ LibraryTag ───────┬─ DONE
//!        └─ GenerateJoblist ──┘
//!        (no mode) ─────────────── ERROR
//! ```
//!
//! Library-tag mode works with either reader. Joblist generation needs
//! the full analysis record, so it refuses to run on the line-scan
//! reader instead of rendering with defaults.

use std::fmt;
use std::path::PathBuf;

use log::info;

use crate::config::locator::{ProjectLayout, DEFAULT_MAINCONF};
use crate::config::model::non_empty;
use crate::config::reader::{locate_analysis_info, missing_yaml, ReaderKind};
use crate::error::{HelperError, Result};
use crate::joblist::{
    joblist_file_name, load_template, render_template, write_joblist, SubstitutionMap,
    DEFAULT_LIBRARY_TAG,
};

/// What the helper was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the analysis' library tag
    LibraryTag,
    /// Render the joblist template
    GenerateJoblist,
}

/// A fully parsed invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub mode: Option<Mode>,
    pub main_conf: Option<String>,
    pub layout: ProjectLayout,
    pub reader: ReaderKind,
    /// Return the rendered joblist instead of writing it
    pub dry_run: bool,
}

impl Invocation {
    /// Invocation with the detected reader and no main config.
    pub fn new(mode: Option<Mode>, layout: ProjectLayout) -> Self {
        Self {
            mode,
            main_conf: None,
            layout,
            reader: ReaderKind::detect(),
            dry_run: false,
        }
    }

    pub fn with_main_conf(mut self, main_conf: impl Into<String>) -> Self {
        self.main_conf = Some(main_conf.into());
        self
    }

    pub fn with_reader(mut self, reader: ReaderKind) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    LibraryTag(String),
    Written(PathBuf),
    Rendered(String),
}

/// What goes to stdout.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibraryTag(tag) => write!(f, "{}", tag),
            Self::Written(path) => write!(f, "Wrote {}", path.display()),
            Self::Rendered(content) => write!(f, "{}", content),
        }
    }
}

/// Runs an invocation.
pub fn dispatch(invocation: &Invocation) -> Result<Outcome> {
    match invocation.mode {
        Some(Mode::LibraryTag) => library_tag(invocation),
        Some(Mode::GenerateJoblist) => generate_joblist(invocation),
        None => Err(HelperError::Usage(
            "specify --library-tag or --generate-joblist".to_string(),
        )),
    }
}

fn library_tag(invocation: &Invocation) -> Result<Outcome> {
    let reference = invocation
        .main_conf
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_MAINCONF);

    let reader = invocation.reader.reader()?;
    let main_conf = invocation.layout.resolve_main_config(reference)?;
    let analysis_path = locate_analysis_info(reader.as_ref(), &invocation.layout, &main_conf)?;
    let tag_record = reader.tag_record(&analysis_path)?;

    let tag = non_empty(&tag_record.library_tag).unwrap_or(DEFAULT_LIBRARY_TAG);
    info!("Library tag: {}", tag);
    Ok(Outcome::LibraryTag(tag.to_string()))
}

fn generate_joblist(invocation: &Invocation) -> Result<Outcome> {
    let reference = invocation
        .main_conf
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            HelperError::Usage(
                "--generate-joblist requires mainconf. Pass it as the first argument or use --mainconf"
                    .to_string(),
            )
        })?;

    if !invocation.reader.is_structured() {
        return Err(missing_yaml());
    }

    let layout = &invocation.layout;
    let reader = invocation.reader.reader()?;
    let main_conf = layout.resolve_main_config(reference)?;
    let analysis_path = locate_analysis_info(reader.as_ref(), layout, &main_conf)?;
    let analysis_info = reader.analysis_info(&analysis_path)?;

    let template = load_template(&layout.template_path())?;
    let invoked_as = layout.relative_to_root(reference);
    let substitutions = SubstitutionMap::build(&analysis_info, Some(invoked_as.as_str()));
    let content = render_template(&template, &substitutions);

    if invocation.dry_run {
        info!("Dry run: joblist not written");
        return Ok(Outcome::Rendered(content));
    }

    let file_name = joblist_file_name(&analysis_info.analysis);
    let path = write_joblist(&layout.joblist_dir(), &file_name, &content)?;
    Ok(Outcome::Written(path))
}
