//! Command-line interface definition using clap.
//!
//! [`Args`] maps flags onto the library configuration types. Flags override
//! whatever a `--config` file sets, and a config file overrides the defaults.
//!
//! ```rust
//! use clap::Parser;
//! use chatstats::cli::Args;
//! use chatstats::config::SenderLabel;
//!
//! let args = Args::parse_from(["chatstats", "inbox/alice_x1", "--terms", "4", "--full-names"]);
//! let config = args.analysis_config().unwrap();
//! assert_eq!(config.terms_per_year, 4);
//! assert_eq!(config.sender_label, SenderLabel::FullName);
//! ```

use std::path::{Component, Path, PathBuf};

use clap::Parser;

use crate::charts::ChartOptions;
use crate::config::{AnalysisConfig, MessengerConfig, RecordPolicy, SenderLabel, TimestampUnit};
use crate::core::filter::FilterConfig;
use crate::error::Result;

pub use crate::format::OutputFormat;

/// Turn a Messenger conversation export into message, word, emoji and
/// hashtag statistics, TF-IDF tables and chart data.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats messages/inbox/alicesmith_a1b2c3
    chatstats message_1.json -o stats --format jsonl
    chatstats inbox/group_x9 --timezone Europe/Berlin --terms 2
    chatstats inbox/group_x9 --after 2021-01-01 --from alice --no-charts")]
pub struct Args {
    /// Conversation folder or a single message JSON file
    pub input: String,

    /// Root folder for the result tables
    #[arg(short, long, default_value = "output")]
    pub output: String,

    /// Table format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Analysis settings as JSON; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// IANA timezone for dates and times (default: US/Eastern)
    #[arg(long, value_name = "TZ")]
    pub timezone: Option<String>,

    /// Terms per calendar year; must divide 12
    #[arg(long, value_name = "N")]
    pub terms: Option<u32>,

    /// Label senders by full name instead of first name
    #[arg(long)]
    pub full_names: bool,

    /// Unit of the export timestamps
    #[arg(long, value_name = "UNIT")]
    pub timestamp_unit: Option<TimestampUnit>,

    /// Keep text exactly as exported (no Mojibake repair)
    #[arg(long)]
    pub no_fix_encoding: bool,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from one sender (full or first name)
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Word list left out of the word_count chart, one per line
    #[arg(long, value_name = "FILE")]
    pub common_words: Option<String>,

    /// Skip chart data
    #[arg(long)]
    pub no_charts: bool,

    /// Log filter for diagnostics on stderr, e.g. "info" or "chatstats=debug"
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    /// Builds the analysis configuration: defaults, then `--config`, then flags.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(Path::new(path))?,
            None => AnalysisConfig::default(),
        };

        if let Some(ref tz) = self.timezone {
            config = config.with_timezone_name(tz)?;
        }
        if let Some(terms) = self.terms {
            config = config.with_terms_per_year(terms);
        }
        if self.full_names {
            config = config.with_sender_label(SenderLabel::FullName);
        }
        if let Some(unit) = self.timestamp_unit {
            config = config.with_timestamp_unit(unit);
        }
        if self.no_fix_encoding {
            config = config.with_fix_encoding(false);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn messenger_config(&self) -> MessengerConfig {
        let policy = if self.strict {
            RecordPolicy::Strict
        } else {
            RecordPolicy::Skip
        };
        MessengerConfig::new().with_record_policy(policy)
    }

    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        Ok(filter)
    }

    pub fn chart_options(&self) -> Result<ChartOptions> {
        match &self.common_words {
            Some(path) => ChartOptions::new().with_common_words_file(Path::new(path)),
            None => Ok(ChartOptions::new()),
        }
    }
}

/// Folder the tables of one conversation go into.
///
/// `<root>/<thread_path>` when the export names its thread, otherwise
/// `<root>/<input folder name>`; for a file input that is its parent folder.
/// Only plain name components of `thread_path` are kept, so the result
/// always stays under `root`.
pub fn output_dir(root: &Path, thread_path: Option<&str>, input: &Path) -> PathBuf {
    if let Some(thread) = thread_path.map(str::trim).filter(|t| !t.is_empty()) {
        let components = Path::new(thread).components();
        if components.clone().any(|c| !matches!(c, Component::Normal(_))) {
            tracing::warn!(thread_path = thread, "dropped non-relative parts of thread path");
        }
        let relative: PathBuf = components
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part),
                _ => None,
            })
            .collect();
        if !relative.as_os_str().is_empty() {
            return root.join(relative);
        }
    }

    let folder = if input.is_dir() {
        Some(input)
    } else {
        input.parent()
    };

    let name = folder
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "conversation".to_string());
    root.join(name)
}
