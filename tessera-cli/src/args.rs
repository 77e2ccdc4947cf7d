//! Command-line flags.

use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use tessera_othello::{Color, Position, START_NOTATION};

pub const DEPTH_DEFAULT: u32 = 12;
pub const DEPTH_MIN: i64 = 1;
pub const DEPTH_MAX: i64 = 60;

#[derive(Parser, Debug)]
#[command(
    name = "tessera",
    about = "Bitboard Othello: perft counts, fixed-depth search and interactive play"
)]
pub struct Args {
    /// Depth in plies for perft or search
    #[arg(
        long,
        default_value_t = DEPTH_DEFAULT,
        value_parser = clap::value_parser!(u32).range(DEPTH_MIN..=DEPTH_MAX)
    )]
    pub depth: u32,

    /// What to run
    #[arg(long = "type", value_enum, default_value_t = RunType::Single)]
    pub run_type: RunType,

    /// Worker threads for a multi-threaded perft (0 uses one per CPU)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Starting position, e.g. "8/8/8/3WB3/3BW3/8/8/8 1 0"
    #[arg(long, default_value = START_NOTATION)]
    pub position: Position,

    /// Color played from the keyboard in play mode
    #[arg(long, value_enum, default_value_t = Side::Black)]
    pub human: Side,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RunType {
    /// Single-threaded perft at every depth up to --depth
    Single,
    /// Perft at --depth with root moves spread over worker threads
    Multi,
    /// Best move and score for the position
    Search,
    /// Play against the search
    Play,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Black,
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::White => Color::White,
        }
    }
}

/// Rewrite a single-dash long flag (`-depth`) into clap's `--depth` form.
/// Short flags, negative numbers and positional values pass through unchanged.
pub fn normalize_flag(arg: OsString) -> OsString {
    let rewritten = match arg.to_str() {
        Some(s)
            if s.len() > 2
                && s.starts_with('-')
                && !s.starts_with("--")
                && s[1..].chars().all(|c| c.is_ascii_alphabetic() || c == '-') =>
        {
            Some(format!("-{}", s))
        }
        _ => None,
    };

    rewritten.map(OsString::from).unwrap_or(arg)
}

impl Args {
    /// Parse flags, accepting both `-flag` and `--flag`.
    pub fn parse_normalized<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::parse_from(args.into_iter().map(normalize_flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(
            std::iter::once("tessera")
                .chain(args.iter().copied())
                .map(OsString::from)
                .map(normalize_flag),
        )
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.depth, DEPTH_DEFAULT);
        assert_eq!(args.run_type, RunType::Single);
        assert_eq!(args.position, Position::new());
        assert_eq!(args.human, Side::Black);
    }

    #[test]
    fn single_dash_flags() {
        let args = parse(&["-depth", "7", "-type", "multi", "-threads", "3"]).unwrap();
        assert_eq!(args.depth, 7);
        assert_eq!(args.run_type, RunType::Multi);
        assert_eq!(args.threads, 3);
    }

    #[test]
    fn double_dash_flags() {
        let args = parse(&["--depth", "4", "--type", "search"]).unwrap();
        assert_eq!(args.depth, 4);
        assert_eq!(args.run_type, RunType::Search);
    }

    #[test]
    fn depth_out_of_range() {
        assert!(parse(&["-depth", "0"]).is_err());
        assert!(parse(&["-depth", "61"]).is_err());
        assert!(parse(&["-depth", "-3"]).is_err());
    }

    #[test]
    fn unknown_type_and_flag() {
        assert!(parse(&["-type", "triple"]).is_err());
        assert!(parse(&["-bogus"]).is_err());
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = parse(&["-help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn position_flag() {
        let args = parse(&["-position", "B7/8/8/8/8/8/8/7W 0 0"]).unwrap();
        assert_eq!(args.position.turn(), Color::White);
        assert!(parse(&["-position", "9/8/8/8/8/8/8/8 1 0"]).is_err());
    }

    #[test]
    fn normalize_leaves_other_args() {
        assert_eq!(normalize_flag("-h".into()), OsString::from("-h"));
        assert_eq!(normalize_flag("-12".into()), OsString::from("-12"));
        assert_eq!(normalize_flag("--depth".into()), OsString::from("--depth"));
        assert_eq!(normalize_flag("multi".into()), OsString::from("multi"));
        assert_eq!(normalize_flag("-depth".into()), OsString::from("--depth"));
    }
}
