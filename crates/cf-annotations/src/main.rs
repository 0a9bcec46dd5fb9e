use anyhow::Result;
use cf_annotations::commands::{self, Cli, Commands};
use cf_annotations::config::EffectiveConfig;
use cf_annotations::errors::classify_exit_code;
use cf_annotations::logging::init_logging;
use clap::Parser;
use std::process;
use std::time::Instant;
use tracing::{info, info_span, Instrument};

#[tokio::main]
async fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format)?;
    let exit_code = match run(cli).await { Ok(()) => 0, Err(e) => { eprintln!("error: {e:#}"); classify_exit_code(&e) } };
    info!(took_ms=%start.elapsed().as_millis(), event="cli.finished", exit_code);
    if exit_code != 0 { process::exit(exit_code); }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        let _span = info_span!("cmd.completions").entered();
        return commands::completions::handle(shell);
    }
    let cfg = EffectiveConfig::load()?;
    dispatch(cli, cfg).await
}

async fn dispatch(cli: Cli, cfg: EffectiveConfig) -> Result<()> {
    let start = Instant::now();
    let result = match cli.command {
        Commands::SetAnnotation { args } => commands::set::handle(&cfg, args).instrument(info_span!("cmd.set")).await,
        Commands::UnsetAnnotation { args } => commands::unset::handle(&cfg, args).instrument(info_span!("cmd.unset")).await,
        Commands::Annotations { args } => commands::view::handle(&cfg, args, cli.output).instrument(info_span!("cmd.view")).await,
        Commands::Completions { .. } => Ok(()),
    };
    let took = start.elapsed().as_millis();
    match &result { Ok(_) => info!(event="cmd.finished", took_ms=%took), Err(_) => info!(event="cmd.failed", took_ms=%took) }
    result
}
