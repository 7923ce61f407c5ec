//! Command-line arguments.

use std::path::PathBuf;

use blameline_core::Selection;
use clap::Parser;
use url::Url;

/// Print a file with inline blame annotations.
#[derive(Debug, Parser)]
#[command(name = "blameline", version)]
pub struct Cli {
    /// File to annotate, relative to the repository root.
    pub path: String,

    /// Repository root.
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Line range to annotate, 1-based and inclusive, as `START` or
    /// `START,END`. Repeatable. Without it no selections are reported.
    #[arg(short = 'L', long = "lines", value_name = "START[,END]", value_parser = parse_line_range)]
    pub lines: Vec<Selection>,

    /// Code-host base URL that commit links are resolved against.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<Url>,

    /// Background variant of the palette: `light` or `dark`.
    #[arg(long)]
    pub theme: Option<String>,

    /// Append each annotation's commit link.
    #[arg(long)]
    pub links: bool,

    /// Print the annotation descriptors as JSON instead of the file.
    #[arg(long)]
    pub json: bool,

    /// Config file to use instead of the XDG default.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Selections to report to the decorator, `None` without `-L`.
    pub fn selections(&self) -> Option<Vec<Selection>> {
        (!self.lines.is_empty()).then(|| self.lines.clone())
    }
}

/// Parses `START` or `START,END` (1-based, inclusive) into a 0-based selection.
fn parse_line_range(raw: &str) -> Result<Selection, String> {
    let parse = |s: &str| -> Result<u32, String> {
        match s.trim().parse::<u32>() {
            Ok(0) | Err(_) => Err(format!("'{s}' is not a line number (lines start at 1)")),
            Ok(n) => Ok(n - 1),
        }
    };
    let (start, end) = match raw.split_once(',') {
        Some((start, end)) => (parse(start)?, parse(end)?),
        None => {
            let line = parse(raw)?;
            (line, line)
        }
    };
    if end < start {
        return Err(format!("range '{raw}' ends before it starts"));
    }
    Ok(Selection::lines(start, end))
}
