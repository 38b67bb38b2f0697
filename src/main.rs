use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use stackedit_export::{ExportConfig, TextEncoding};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Turn a StackEdit workspace export into a tree of Markdown files
#[derive(Parser, Debug)]
#[command(name = "stackedit-export", version, about)]
struct Cli {
    /// The workspace JSON, or a directory containing "StackEdit workspace.json"
    #[arg(env = "STACKEDIT_JSON")]
    input: PathBuf,

    /// Base directory of the Markdown tree [default: <input dir>/StackEdit]
    #[arg(short, long, env = "STACKEDIT_OUTPUT")]
    output: Option<PathBuf>,

    /// Encoding for reading the dump and writing files (utf-8-sig writes a BOM)
    #[arg(short, long, env = "STACKEDIT_ENCODING", default_value = "utf-8")]
    encoding: String,

    /// Strip >*|<"?: from file and folder names (default on Windows)
    #[arg(long, overrides_with = "keep_illegal_chars")]
    remove_illegal_chars: bool,

    /// Keep names as they are, even on Windows
    #[arg(long, overrides_with = "remove_illegal_chars")]
    keep_illegal_chars: bool,

    /// Overwrite existing files instead of aborting
    #[arg(short, long)]
    update: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }

    /// `None` when neither flag was given, leaving the config default
    fn remove_illegal_chars(&self) -> Option<bool> {
        if self.remove_illegal_chars {
            Some(true)
        } else if self.keep_illegal_chars {
            Some(false)
        } else {
            None
        }
    }

    fn into_config(self) -> Result<ExportConfig> {
        let encoding = TextEncoding::from_label(&self.encoding)
            .with_context(|| format!("Invalid --encoding {:?}", self.encoding))?;

        let mut builder = ExportConfig::builder(&self.input)
            .encoding(encoding)
            .update(self.update);
        if let Some(enabled) = self.remove_illegal_chars() {
            builder = builder.remove_illegal_chars(enabled);
        }
        if let Some(output) = self.output {
            builder = builder.output_dir(output);
        }
        Ok(builder.build())
    }
}

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let config = cli.into_config()?;
    let summary = stackedit_export::run(&config)
        .with_context(|| format!("Failed to export {}", config.input.display()))?;

    println!(
        "✓ Exported {} files ({} in .trash) to {} [{:.2}s]",
        summary.written,
        summary.trashed,
        summary.output_dir.display(),
        start_time.elapsed().as_secs_f64()
    );
    if summary.overwritten > 0 {
        println!("  Overwritten:          {}", summary.overwritten);
    }
    println!("  Directories created:  {}", summary.directories_created);

    Ok(())
}
