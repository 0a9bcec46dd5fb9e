use anyhow::Result;
use tracing::info;
use crate::args::{self, Mode, ParsedArgs};
use crate::client::CfClient;
use crate::config::EffectiveConfig;
use crate::resource;

pub async fn handle(cfg: &EffectiveConfig, raw: Vec<String>) -> Result<()> {
    let parsed = args::parse(Mode::Set, &raw)?;
    let client = CfClient::new(&cfg.target()?)?;
    println!("{}", apply_patch(&client, &parsed).await?);
    Ok(())
}

/// Resolves the resource and sends the metadata document as a PATCH.
/// Returns the response body, pretty-printed.
pub async fn apply_patch(client: &CfClient, parsed: &ParsedArgs) -> Result<String> {
    let res = resource::resolve(client, parsed).await?;
    let body = client.patch_json(&res.path(), &parsed.metadata).await?;
    info!(event="annotations.patched", kind=%res.kind, guid=%res.guid, keys=parsed.metadata.annotations().len());
    Ok(serde_json::to_string_pretty(&body)?)
}
