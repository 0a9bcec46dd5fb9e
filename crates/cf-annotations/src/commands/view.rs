use anyhow::Result;
use serde::Serialize;
use tracing::info;
use crate::args::{self, Mode, ParsedArgs};
use crate::client::CfClient;
use crate::config::EffectiveConfig;
use crate::errors::{CliError, CliErrorKind};
use crate::metadata::{Entries, MetadataDocument};
use crate::resource;
use super::OutputFormat;

#[derive(Debug, Serialize)]
struct ViewOutput<'a> { resource_type: &'a str, resource_name: &'a str, guid: &'a str, annotations: &'a Entries }

pub async fn handle(cfg: &EffectiveConfig, raw: Vec<String>, format: OutputFormat) -> Result<()> {
    let parsed = args::parse(Mode::View, &raw)?;
    let client = CfClient::new(&cfg.target()?)?;
    print!("{}", fetch_and_render(&client, &parsed, format).await?);
    Ok(())
}

pub async fn fetch_and_render(client: &CfClient, parsed: &ParsedArgs, format: OutputFormat) -> Result<String> {
    let res = resource::resolve(client, parsed).await?;
    let body = client.get_json(&res.path()).await?;
    let doc: MetadataDocument = serde_json::from_value(body)
        .map_err(|e| CliError::with_source(CliErrorKind::Runtime(format!("unexpected {} document", res.kind)), e))?;
    info!(event="annotations.viewed", kind=%res.kind, guid=%res.guid, count=doc.annotations().len());
    match format {
        OutputFormat::Text => Ok(render_text(&parsed.resource_type, &parsed.resource_name, doc.annotations())),
        OutputFormat::Json => {
            let o = ViewOutput { resource_type: parsed.kind.as_str(), resource_name: &parsed.resource_name, guid: &res.guid, annotations: doc.annotations() };
            Ok(format!("{}\n", serde_json::to_string_pretty(&o)?))
        }
    }
}

pub fn render_text(resource_type: &str, resource_name: &str, annotations: &Entries) -> String {
    let mut out = format!("{resource_type}: {resource_name}\n\nAnnotations:\n\n");
    for (k, v) in annotations {
        out.push_str(&format!("{k}: {}\n\n", v.as_deref().unwrap_or("")));
    }
    out
}
