//! Template Rendering
//!
//! Literal placeholder substitution over the joblist template and
//! writing of the result.
//!
//! Only the fixed `__NAME__` tokens of [`Placeholder`] are replaced;
//! anything else in the template, including unknown `__TOKENS__`, is
//! passed through untouched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use super::fields::{Placeholder, SubstitutionMap};
use crate::config::locator::require_file;
use crate::error::{HelperError, Result};

/// Reads the joblist template.
pub fn load_template(path: &Path) -> Result<String> {
    let path = require_file("template", path.to_path_buf())?;
    fs::read_to_string(&path).map_err(|source| HelperError::Read { path, source })
}

/// Replaces every known placeholder token with its value.
pub fn render_template(template: &str, substitutions: &SubstitutionMap) -> String {
    let mut content = template.to_string();

    for placeholder in Placeholder::ALL {
        let Some(value) = substitutions.get(placeholder) else {
            continue;
        };

        let token = placeholder.token();
        let count = content.matches(token.as_str()).count();
        if count > 0 {
            content = content.replace(token.as_str(), value);
            debug!("Replaced {} x{}", token, count);
        }
    }

    content
}

/// Writes rendered content to `dir/file_name`.
///
/// Content goes to a temporary file in `dir` first and is renamed over
/// the target, so the joblist is either fully written or left as it was.
pub fn write_joblist(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let out_path = dir.join(file_name);
    let write_err = |source| HelperError::Write {
        path: out_path.clone(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(&out_path).map_err(|e| write_err(e.error))?;

    set_readable(&out_path).map_err(write_err)?;

    info!("Wrote joblist ({} bytes): {}", content.len(), out_path.display());
    Ok(out_path)
}

#[cfg(unix)]
fn set_readable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{AnalysisInfo, TagRecord};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_render_starver_only() {
        let info = AnalysisInfo {
            tag: TagRecord::with_library_tag("SL25a"),
            ..Default::default()
        };
        let map = SubstitutionMap::build(&info, None);

        assert_eq!(
            render_template("<var name=\"STARVER\" value=\"__STARVER__\"/>", &map),
            "<var name=\"STARVER\" value=\"SL25a\"/>"
        );
    }

    #[test]
    fn test_render_all_placeholders() {
        let map = SubstitutionMap::build(&AnalysisInfo::default(), Some("config/mainconf/m.yaml"));
        let template = Placeholder::ALL
            .iter()
            .map(|p| p.token())
            .collect::<Vec<_>>()
            .join("\n");

        let rendered = render_template(&template, &map);

        assert_eq!(
            rendered,
            "auau19_anaLambda_temp\n\
             run_anaLambda.C\n\
             SL24y\n\
             auau19_anaLambda_temp\n\
             auau19_anaLambda_temp\n\
             config/mainconf/m.yaml\n\
             /star/u/$USER/Path/To/star-analyzer\n\
             catalog:star.bnl.gov?\n\
             40\n\
             anaLambda"
        );
    }

    #[test]
    fn test_unknown_placeholders_untouched() {
        let map = SubstitutionMap::build(&AnalysisInfo::default(), None);
        let template = "__NEW_FIELD__ __N_FILES__ __N_FILES__ _STARVER_";

        assert_eq!(render_template(template, &map), "__NEW_FIELD__ 40 40 _STARVER_");
    }

    #[test]
    fn test_missing_value_left_in_place() {
        let template = "__JOB_NAME__";
        assert_eq!(render_template(template, &SubstitutionMap::default()), "__JOB_NAME__");
    }

    #[test]
    fn test_load_missing_template() {
        let dir = tempdir().unwrap();
        let err = load_template(&dir.path().join("job_template_from_conf.xml")).unwrap_err();
        assert!(matches!(err, HelperError::NotFound { what: "template", .. }));
    }

    #[test]
    fn test_write_joblist() {
        let dir = tempdir().unwrap();

        let path = write_joblist(dir.path(), "joblist_run_anaLambda.xml", "<job/>").unwrap();

        assert_eq!(path, dir.path().join("joblist_run_anaLambda.xml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<job/>");
    }

    #[test]
    fn test_write_joblist_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("joblist_a.xml"), "old content that is longer").unwrap();

        let path = write_joblist(dir.path(), "joblist_a.xml", "new").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_joblist_missing_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no/such/dir");

        let err = write_joblist(&missing, "joblist_a.xml", "x").unwrap_err();
        match err {
            HelperError::Write { path, .. } => assert_eq!(path, missing.join("joblist_a.xml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
