//! Joblist Generation Module
//!
//! Turns resolved analysis info into a rendered job-submission
//! descriptor.
//!
//! - [`catalog`]: Data-catalog URL from the tag record
//! - [`fields`]: Placeholder values with defaults
//! - [`render`]: Template substitution and output

pub mod catalog;
pub mod fields;
pub mod render;

pub use catalog::build_catalog_url;
pub use fields::{joblist_file_name, Placeholder, SubstitutionMap, DEFAULT_LIBRARY_TAG};
pub use render::{load_template, render_template, write_joblist};
