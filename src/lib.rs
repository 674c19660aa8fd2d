//! Analysis Info Helper
//!
//! Resolves a main config to its analysis-info document and either
//! reports the software library tag or renders a joblist (job-submission
//! descriptor) from a fixed template.
//!
//! # Architecture
//!
//! - [`config`]: Config location and the structured / line-scan readers
//! - [`joblist`]: Catalog URL, placeholder values and template rendering
//! - [`dispatch`]: Mode selection and end-to-end control flow
//! - [`error`]: Error kinds reported by the CLI
//!
//! # Example
//!
//! ```rust,no_run
//! use anahelper::config::ProjectLayout;
//! use anahelper::dispatch::{dispatch, Invocation, Mode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let layout = ProjectLayout::new("/star/u/me/star-analyzer");
//!     let invocation = Invocation::new(Some(Mode::GenerateJoblist), layout)
//!         .with_main_conf("config/mainconf/main_auau19_anaLambda.yaml");
//!
//!     println!("{}", dispatch(&invocation)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod joblist;

// Re-export commonly used types
pub use config::{ProjectLayout, ReaderKind};
pub use dispatch::{dispatch, Invocation, Mode, Outcome};
pub use error::{HelperError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "analysis-info-helper";
