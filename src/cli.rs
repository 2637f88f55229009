use crate::config::GridOverrides;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gridcatch")]
#[command(version, about = "Steer the cursor around the grid and catch the '*'", long_about = None)]
#[command(after_help = "Use the arrow keys to move. Press ESCAPE to quit.")]
pub struct Cli {
    /// Play the game. Playing is the default, so the flag is accepted for
    /// compatibility only
    #[arg(short = 'p', long)]
    pub play: bool,

    /// Grid width including the border (overrides config)
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<u16>,

    /// Grid height including the border (overrides config)
    #[arg(long, value_name = "ROWS")]
    pub height: Option<u16>,

    /// Glyph for empty cells (overrides config)
    #[arg(long, value_name = "CHAR")]
    pub background: Option<char>,

    /// Glyph for the player cursor (overrides config)
    #[arg(long, value_name = "CHAR")]
    pub foreground: Option<char>,

    /// Glyph for the border (overrides config)
    #[arg(long, value_name = "CHAR")]
    pub border: Option<char>,

    /// Seed for target placement, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file to read instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> GridOverrides {
        GridOverrides {
            width: self.width,
            height: self.height,
            background: self.background,
            foreground: self.foreground,
            border: self.border,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
