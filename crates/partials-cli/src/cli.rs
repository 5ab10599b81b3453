//! CLI argument definitions for the `partials` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "partials",
    version,
    about = "Partial transformation of JSON documents",
    long_about = "Transform JSON documents with include, exclude, only and except directives.\n\n\
                  Selectors are dotted paths with `*` wildcards and `{a,b}` groups,\n\
                  for example `songs.{name,artist}`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a JSON document and print the result.
    Transform(TransformArgs),

    /// Parse selectors and print them in canonical form.
    Selector(SelectorArgs),
}

#[derive(Parser)]
pub struct TransformArgs {
    /// JSON document to transform (reads stdin when omitted or `-`).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Show lazy properties (repeatable, comma lists allowed).
    #[arg(long = "include", value_name = "SELECTOR")]
    pub include: Vec<String>,

    /// Hide properties shown by default.
    #[arg(long = "exclude", value_name = "SELECTOR")]
    pub exclude: Vec<String>,

    /// Keep only the listed properties.
    #[arg(long = "only", value_name = "SELECTOR")]
    pub only: Vec<String>,

    /// Drop the listed properties.
    #[arg(long = "except", value_name = "SELECTOR")]
    pub except: Vec<String>,

    /// Treat the selected input properties as lazy: hidden unless included.
    #[arg(long = "lazy", value_name = "SELECTOR")]
    pub lazy: Vec<String>,

    /// Bind directives from a query string, as a web request would.
    ///
    /// Query directives are gated by the allowlists of `--allow-config`;
    /// without one every property may be targeted.
    #[arg(long = "query", value_name = "QUERY")]
    pub query: Option<String>,

    /// TOML file with the allowlists for query directives.
    ///
    /// Keys `include`, `exclude`, `only`, `except` take `true` (any
    /// property), `false` or a list of property names. Missing keys deny.
    #[arg(long = "allow-config", value_name = "PATH", requires = "query")]
    pub allow_config: Option<PathBuf>,

    /// Fail when data objects nest deeper than this.
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Pretty-print the output.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Parser)]
pub struct SelectorArgs {
    /// Selectors to parse (comma lists allowed).
    #[arg(value_name = "SELECTOR", required = true)]
    pub selectors: Vec<String>,

    /// Print the merged selector tree instead of each selector.
    #[arg(long = "tree")]
    pub tree: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
