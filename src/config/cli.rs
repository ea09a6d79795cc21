use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

use crate::application::render::RenderMode;

/// Command-line arguments for the quizmark binary.
#[derive(Debug, Parser)]
#[command(
    name = "quizmark",
    version,
    about = "Render quiz prompts and explanations to HTML"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "QUIZMARK_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a single prompt or explanation (reads stdin when FILE is omitted).
    Render(RenderArgs),
    /// Render a quiz document as a question sheet, or as a scored results view.
    Quiz(QuizArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override how source HTML is treated (escape|sanitize|raw).
    #[arg(long = "escape", value_name = "POLICY")]
    pub escape: Option<String>,

    /// Override the CSS class put on generated tables.
    #[arg(long = "table-class", value_name = "CLASS")]
    pub table_class: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Detect tabular text (question prompts).
    #[default]
    Table,
    /// Apply the explanation markdown passes.
    Markdown,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Table => RenderMode::Table,
            ModeArg::Markdown => RenderMode::Markdown,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Conversion pipeline to run.
    #[arg(long, value_enum, default_value_t = ModeArg::Table)]
    pub mode: ModeArg,

    /// Input file; `-` or nothing reads stdin.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct QuizArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Render the scored results view instead of the question sheet.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub results: bool,

    /// Quiz document: a JSON array of questions.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}
