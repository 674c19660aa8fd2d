//! Analysis Info Helper CLI Entry Point
//!
//! # Usage
//!
//! ```bash
//! # Print the library tag (used by setup.sh)
//! analysis-info-helper --library-tag [--mainconf PATH]
//!
//! # Render job/joblist/joblist_<baseRunMacro>.xml
//! analysis-info-helper --generate-joblist config/mainconf/main_auau19_anaLambda.yaml
//!
//! # Preview the rendered joblist without writing it
//! analysis-info-helper --generate-joblist MAINCONF --dry-run
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use log::debug;

use anahelper::config::ProjectLayout;
use anahelper::dispatch::{dispatch, Invocation, Mode, Outcome};
use anahelper::{HelperError, ReaderKind, APP_NAME};

/// Read analysis info from a main config; output the library tag or generate a joblist.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["library_tag", "generate_joblist"])))]
struct Cli {
    /// Main config path (e.g. config/mainconf/main_auau19_anaLambda.yaml)
    #[arg(value_name = "MAINCONF")]
    mainconf: Option<String>,

    /// Main config path; ignored when MAINCONF is given
    #[arg(long = "mainconf", value_name = "PATH")]
    mainconf_opt: Option<String>,

    /// Project root directory [default: parent of the executable's directory,
    /// i.e. the project when installed as bin/analysis-info-helper; pass this
    /// when running from target/ via cargo run]
    #[arg(long, value_name = "PATH", env = "ANAHELPER_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Print starTag.libraryTag to stdout
    #[arg(long)]
    library_tag: bool,

    /// Generate the joblist XML from the template
    #[arg(long)]
    generate_joblist: bool,

    /// Read configs by line scanning instead of parsing YAML
    #[arg(long)]
    line_scan: bool,

    /// Print the rendered joblist instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> Option<Mode> {
        if self.library_tag {
            Some(Mode::LibraryTag)
        } else if self.generate_joblist {
            Some(Mode::GenerateJoblist)
        } else {
            None
        }
    }

    fn into_invocation(self) -> Invocation {
        let layout = match &self.project_root {
            Some(root) => ProjectLayout::new(root),
            None => ProjectLayout::from_default_root(),
        };

        let reader = if self.line_scan {
            ReaderKind::LineScan
        } else {
            ReaderKind::detect()
        };

        let mut invocation = Invocation::new(self.mode(), layout)
            .with_reader(reader)
            .with_dry_run(self.dry_run);
        invocation.main_conf = self.mainconf.or(self.mainconf_opt);
        invocation
    }
}

/// The single diagnostic line printed for a failed invocation.
fn error_line(err: &HelperError) -> String {
    format!("ERROR: {}", err)
}

/// Configures the logging system; everything goes to stderr.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let invocation = cli.into_invocation();
    debug!(
        "Project root: {}, reader: {}",
        invocation.layout.root().display(),
        invocation.reader
    );

    match dispatch(&invocation) {
        Ok(Outcome::Rendered(content)) => {
            print!("{}", content);
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}
