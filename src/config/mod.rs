//! Configuration Resolution Module
//!
//! Locates the main config, follows it to the analysis-info document and
//! reads the tag and analysis records.
//!
//! # Structure
//!
//! - [`locator`]: Project layout and config path resolution
//! - [`model`]: Tag and analysis records
//! - [`reader`]: The reader capability and strategy selection
//! - [`structured`]: YAML reader (`yaml` feature)
//! - [`line_scan`]: Regex fallback reader

pub mod line_scan;
pub mod locator;
pub mod model;
pub mod reader;
#[cfg(feature = "yaml")]
pub mod structured;

pub use line_scan::LineScanReader;
pub use locator::{ProjectLayout, DEFAULT_MAINCONF};
pub use model::{AnalysisInfo, AnalysisRecord, TagRecord};
pub use reader::{locate_analysis_info, ConfigReader, ReaderKind};
#[cfg(feature = "yaml")]
pub use structured::YamlReader;
