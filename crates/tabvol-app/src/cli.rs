use clap::Parser;

/// tabvol — per-tab audio volume messaging demo.
#[derive(Parser, Debug)]
#[command(name = "tabvol", version, about)]
pub struct Args {
    /// Debounce window for list-update notifications, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
