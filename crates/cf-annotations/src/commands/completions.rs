use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells::{Bash, Fish, Zsh}};
use std::io;
use super::Cli;
use crate::errors::CliError;
use tracing::info;

pub fn handle(shell: String) -> Result<()> {
    let mut cmd = Cli::command();
    match shell.as_str() {
        "bash" => generate(Bash, &mut cmd, "cf-annotations", &mut io::stdout()),
        "zsh" => generate(Zsh, &mut cmd, "cf-annotations", &mut io::stdout()),
        "fish" => generate(Fish, &mut cmd, "cf-annotations", &mut io::stdout()),
        _ => return Err(CliError::usage(format!("unsupported shell: {shell}")).into()),
    }
    info!(event="completions.generated", shell=%shell);
    Ok(())
}
