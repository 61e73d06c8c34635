use clap::{Parser, ValueEnum};
use descent::parser::options::{
    ParseMode, ParseOptions, DEFAULT_MAX_DEPTH, DEFAULT_SNAPSHOT_LIMIT, MAX_DEPTH_CEILING,
};
use descent::parser::parse::Production;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Token list file: one `<kind> <value>` pair per line.
    /// Blank lines and lines starting with '#' are ignored.
    pub tokens: String,

    /// Production to start from.
    #[arg(short, long, default_value = "class")]
    pub production: Production,

    #[arg(short, long, value_enum, default_value_t = Mode::Standard)]
    pub mode: Mode,

    /// Production nesting limit, at most 512.
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    pub max_depth: usize,

    /// Memory budget for the recorded trace, in bytes.
    #[arg(short, long, default_value_t = DEFAULT_SNAPSHOT_LIMIT)]
    pub snapshot_limit: usize,

    /// Print the tree (or the error) instead of opening the viewer.
    #[arg(long)]
    pub print: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Mode {
    Reference,
    Standard,
}

fn parse_max_depth(s: &str) -> Result<usize, String> {
    let depth: usize = s.parse().map_err(|e| format!("{}", e))?;
    if depth == 0 || depth > MAX_DEPTH_CEILING {
        return Err(format!("must be between 1 and {}", MAX_DEPTH_CEILING));
    }
    Ok(depth)
}

impl Cli {
    pub fn options(&self) -> ParseOptions {
        let mode = match self.mode {
            Mode::Reference => ParseMode::Reference,
            Mode::Standard => ParseMode::Standard,
        };
        let options = ParseOptions::new()
            .with_mode(mode)
            .with_max_depth(self.max_depth);

        // Printing does not need the trace
        if self.print {
            options
        } else {
            options.with_snapshot_limit(self.snapshot_limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_depth_range() {
        assert_eq!(parse_max_depth("64"), Ok(64));
        assert_eq!(parse_max_depth(&MAX_DEPTH_CEILING.to_string()), Ok(MAX_DEPTH_CEILING));
        assert!(parse_max_depth("0").is_err());
        assert!(parse_max_depth("1000000").is_err());
        assert!(parse_max_depth("deep").is_err());

        let cli = Cli::try_parse_from(["descent", "demos/main.tokens", "-d", "100000"]);
        assert!(cli.is_err());
        let cli = Cli::try_parse_from(["descent", "demos/main.tokens", "-d", "32"]).unwrap();
        assert_eq!(cli.options().max_depth, 32);
    }
}
