use anyhow::Result;
use crate::args::{self, Mode};
use crate::client::CfClient;
use crate::config::EffectiveConfig;
use super::set::apply_patch;

pub async fn handle(cfg: &EffectiveConfig, raw: Vec<String>) -> Result<()> {
    let parsed = args::parse(Mode::Unset, &raw)?;
    let client = CfClient::new(&cfg.target()?)?;
    println!("{}", apply_patch(&client, &parsed).await?);
    Ok(())
}
