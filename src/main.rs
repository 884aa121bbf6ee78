use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::IpAddr;
use std::path::PathBuf;
use termcolor::{ColorChoice, StandardStream};

use cachepiper::capture::manager::CaptureManager;
use cachepiper::models::config::{Filter, PrinterOptions, DEFAULT_LOCAL_ADDRESS_WIDTH};
use cachepiper::printer::value::PlainValueFormatter;
use cachepiper::printer::MessagePrinter;
use cachepiper::utils::logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Display decoded cache protocol traffic")]
struct Args {
    /// File with decoded events, one JSON object per line (stdin if omitted)
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// Only show messages to or from this IP address
    #[clap(short = 'H', long)]
    host: Option<IpAddr>,

    /// Only show messages to or from this port (0 = any)
    #[clap(short, long, default_value = "0")]
    port: u16,

    /// Stop after printing this many messages (0 = unbounded)
    #[clap(short = 'n', long, default_value = "0")]
    max_messages: u64,

    /// Regular expression a message must match to be shown
    #[clap(short = 'e', long)]
    pattern: Option<String>,

    /// Show messages that do not match the pattern
    #[clap(short = 'v', long)]
    invert_match: bool,

    /// Number of messages to show after a match
    #[clap(short = 'A', long, default_value = "0")]
    after_match: u64,

    /// Only show messages whose value is at least this many bytes
    #[clap(long, default_value = "0")]
    min_value_size: usize,

    /// Only show messages whose value is at most this many bytes
    #[clap(long)]
    max_value_size: Option<usize>,

    /// Echo the raw wire bytes instead of formatted messages
    #[clap(short, long)]
    raw: bool,

    /// Select and count messages without printing them
    #[clap(short, long)]
    quiet: bool,

    /// Disable colored output
    #[clap(long)]
    no_color: bool,

    /// Print the capture timestamp of every message
    #[clap(short, long)]
    timestamps: bool,

    /// Display width reserved for local socket paths
    #[clap(long, default_value_t = DEFAULT_LOCAL_ADDRESS_WIDTH)]
    local_address_width: usize,

    /// Log level (trace, debug, info, warn, error, off)
    #[clap(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logger(logging::get_log_level(&args.log_level));

    info!("Starting cachepiper v{}", env!("CARGO_PKG_VERSION"));

    let options = PrinterOptions {
        raw: args.raw,
        quiet: args.quiet,
        disable_color: args.no_color,
        print_timestamps: args.timestamps,
        max_messages: args.max_messages,
        num_after_match: args.after_match,
        local_address_width: args.local_address_width,
    };

    let mut filter = Filter {
        host: args.host,
        port: args.port,
        value_min_size: args.min_value_size,
        value_max_size: args.max_value_size.unwrap_or(usize::MAX),
        pattern: None,
        invert_match: args.invert_match,
    };
    if let Some(pattern) = &args.pattern {
        filter = filter
            .with_pattern(pattern)
            .with_context(|| format!("Invalid pattern '{}'", pattern))?;
    }

    let color = if options.disable_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let mut printer = MessagePrinter::new(
        options,
        filter,
        Box::new(PlainValueFormatter),
        StandardStream::stdout(color),
    )?;

    let source: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!("Reading events from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            info!("Reading events from stdin");
            Box::new(io::stdin().lock())
        }
    };

    let stats = CaptureManager::new(source).run(&mut printer)?;
    eprintln!(
        "{} messages processed, {} printed",
        stats.total_messages, stats.printed_messages
    );

    Ok(())
}
