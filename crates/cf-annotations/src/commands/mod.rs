use clap::{Parser, Subcommand};

pub mod set;
pub mod unset;
pub mod view;
pub mod completions;

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum LogFormat { Auto, Text, Json }

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat { #[default] Text, Json }

#[derive(Parser, Debug)]
#[command(name = "cf-annotations", version, about = "Manipulate annotations on Cloud Foundry resources", after_help = crate::args::USAGE)]
pub struct Cli {
    /// Log level: trace|debug|info|warn|error
    #[arg(long, default_value = "warn")]
    pub log_level: String,
    /// Log format: auto|text|json
    #[arg(long, default_value = "auto")]
    pub log_format: LogFormat,
    /// Output format for `annotations`
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set annotations: resource-type resource-name key=value... [-s stack]
    SetAnnotation {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// Remove annotations: resource-type resource-name key... [-s stack]
    UnsetAnnotation {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// Show annotations: resource-type resource-name [-s stack]
    Annotations {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// Generate shell completions (hidden)
    #[command(hide = true)]
    Completions { #[arg(long, default_value = "bash")] shell: String },
}
