//! Command-line arguments.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use gatekeep_core::config::CliOverrides;
use gatekeep_core::errors::ChangeSetError;
use gatekeep_core::ChangeSet;

/// Pre-merge quality gate: scans a change set for disallowed markers and
/// missing migrations, checks line coverage, and exits 0 (pass), 1 (fail),
/// or 2 (could not run).
#[derive(Parser, Debug)]
#[command(name = "gatekeep")]
#[command(version)]
pub struct Cli {
    /// Changed paths, relative to the project root
    #[arg(value_name = "PATHS")]
    pub paths: Vec<String>,

    /// Read additional newline-separated paths from FILE ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub paths_from: Option<String>,

    /// Project root all paths resolve against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Config file [default: <root>/gatekeep.toml if present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum line coverage in [0, 1]
    #[arg(long, value_name = "F")]
    pub threshold: Option<f64>,

    /// Coverage XML report, relative to the root
    #[arg(long, value_name = "FILE")]
    pub coverage_report: Option<String>,

    /// Migrations directory, relative to the root
    #[arg(long, value_name = "DIR")]
    pub migrations_dir: Option<String>,

    /// Path prefix marking schema/model files (repeatable)
    #[arg(long = "schema-prefix", value_name = "P")]
    pub schema_prefixes: Vec<String>,

    /// Disallowed line-start marker (regex)
    #[arg(long, value_name = "RE")]
    pub marker_pattern: Option<String>,

    /// File extension eligible for the marker scan (repeatable)
    #[arg(long = "marker-ext", value_name = "EXT")]
    pub marker_extensions: Vec<String>,

    /// Only run this rule (repeatable)
    #[arg(long = "rule", value_name = "ID")]
    pub rules: Vec<String>,

    /// Report format: text, json, junit
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Colorize the text report
    #[arg(long)]
    pub color: bool,

    /// Evaluate rules in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags that override file and environment configuration.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            threshold: self.threshold,
            coverage_report: self.coverage_report.clone(),
            migrations_dir: self.migrations_dir.clone(),
            schema_prefixes: self.schema_prefixes.clone(),
            marker_pattern: self.marker_pattern.clone(),
            marker_extensions: self.marker_extensions.clone(),
            enabled_rules: self.rules.clone(),
            format: self.format.clone(),
            color: self.color.then_some(true),
            parallel: self.parallel.then_some(true),
        }
    }

    /// Positional paths followed by any `--paths-from` entries.
    pub fn change_set(&self) -> Result<ChangeSet, ChangeSetError> {
        let mut paths = self.paths.clone();
        if let Some(source) = self.paths_from.as_deref() {
            paths.extend(read_paths(source)?);
        }
        ChangeSet::new(paths)
    }
}

fn read_paths(source: &str) -> Result<Vec<String>, ChangeSetError> {
    if source == "-" {
        return ChangeSet::read_list(io::stdin().lock(), "stdin");
    }
    let file = File::open(source).map_err(|e| ChangeSetError::ListUnreadable {
        source_name: source.to_string(),
        message: e.to_string(),
    })?;
    ChangeSet::read_list(BufReader::new(file), source)
}
