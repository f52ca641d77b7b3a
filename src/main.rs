use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use studio_components::logging::{self, LoggingGuard};
use studio_components::{ConfigOverrides, Converter, OutputStatistics};

#[derive(Parser, Debug)]
#[command(name = "studio-components")]
#[command(about = "Convert the component spreadsheet into components.json")]
#[command(version)]
struct Cli {
    /// TOML file with configuration overrides (keys: source_path, sheet_name,
    /// output_path, required_fields, text_encoding)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spreadsheet to read (.xlsx or .xls)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Sheet holding the component rows
    #[arg(long)]
    sheet: Option<String>,

    /// Where to write the JSON document
    #[arg(long)]
    output: Option<PathBuf>,

    /// Charset for the output file
    #[arg(long)]
    encoding: Option<String>,

    /// Also write JSON log lines to a daily-rotated file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Result<ConfigOverrides> {
        let from_file = match &self.config {
            Some(path) => ConfigOverrides::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => ConfigOverrides::default(),
        };
        let from_flags = ConfigOverrides {
            source_path: self.source.clone(),
            sheet_name: self.sheet.clone(),
            output_path: self.output.clone(),
            required_fields: None,
            text_encoding: self.encoding.clone(),
        };
        Ok(from_file.merge(from_flags))
    }
}

fn print_statistics(stats: &OutputStatistics) {
    println!("\n📊 Conversion Statistics:");
    println!("   Total components: {}", stats.total_components);
    println!("   Output file size: {} bytes", stats.file_size_bytes);
    println!("   Output file: {}", stats.output_file.display());
}

// Flush the log file before leaving; process::exit skips destructors
fn exit_with(code: u8, guard: LoggingGuard) -> ! {
    drop(guard);
    std::process::exit(code.into())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let guard = logging::init_logging(cli.log_dir.as_deref());

    let converter = match cli
        .overrides()
        .and_then(|overrides| Converter::with_overrides(overrides).map_err(Into::into))
    {
        Ok(converter) => converter,
        Err(e) => {
            error!("{:#}", e);
            exit_with(1, guard);
        }
    };

    // The conversion itself is synchronous; run it off the async thread so
    // Ctrl-C can still be observed.
    let task = tokio::task::spawn_blocking(move || {
        if converter.convert() {
            Some(converter.get_statistics())
        } else {
            None
        }
    });

    tokio::select! {
        joined = task => match joined {
            Ok(Some(stats)) => {
                if let Some(stats) = stats {
                    print_statistics(&stats);
                }
                drop(guard);
                ExitCode::SUCCESS
            }
            Ok(None) => exit_with(1, guard),
            Err(e) => {
                error!("Unexpected error: {}", e);
                exit_with(1, guard);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Conversion cancelled by user");
            exit_with(1, guard);
        }
    }
}
