//! Catalog URL Builder
//!
//! Assembles the data-catalog query used to select input files.

use crate::config::model::{non_empty, TagRecord};

/// Catalog host every query starts with.
pub const CATALOG_BASE: &str = "catalog:star.bnl.gov";

/// Builds the catalog URL for a tag record.
///
/// Clauses appear in a fixed order (trigger sets, production, file type,
/// file name filter, storage exclusion) and absent or empty fields are
/// skipped. The `?` separator is always present.
///
/// # Example
///
/// ```
/// use anahelper::config::TagRecord;
/// use anahelper::joblist::catalog::build_catalog_url;
///
/// let tag = TagRecord {
///     filetype: Some("daq_reco_picoDst".to_string()),
///     trigger_sets: Some("production_19GeV_2019".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(
///     build_catalog_url(&tag),
///     "catalog:star.bnl.gov?trgsetupname=production_19GeV_2019,filetype=daq_reco_picoDst"
/// );
/// ```
pub fn build_catalog_url(tag: &TagRecord) -> String {
    let clauses: [(&str, &Option<String>); 5] = [
        ("trgsetupname=", &tag.trigger_sets),
        ("production=", &tag.production_tag),
        ("filetype=", &tag.filetype),
        ("filename~", &tag.filename_filter),
        ("storage!=", &tag.storage_exclude),
    ];

    let parts: Vec<String> = clauses
        .iter()
        .filter_map(|(prefix, value)| non_empty(value).map(|v| format!("{}{}", prefix, v)))
        .collect();

    format!("{}?{}", CATALOG_BASE, parts.join(","))
}
