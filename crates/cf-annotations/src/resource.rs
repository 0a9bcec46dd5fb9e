use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, info};
use crate::args::{ParsedArgs, ResourceKind};
use crate::client::CfClient;
use crate::errors::{CliError, CliErrorKind};

/// A resource identified by GUID, ready for a `/v3/<collection>/<guid>` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub kind: ResourceKind,
    pub guid: String,
}

impl ResolvedResource {
    pub fn path(&self) -> String { format!("/v3/{}/{}", self.kind.endpoint(), self.guid) }
}

#[derive(Debug, Deserialize)]
struct ResourceList { #[serde(default)] resources: Vec<ResourceRef> }

#[derive(Debug, Deserialize)]
struct ResourceRef { guid: String }

/// Builds the list query used to find `name` among resources of `kind`.
pub fn lookup_path(kind: ResourceKind, name: &str, stack: Option<&str>, org_guid: Option<&str>, space_guid: Option<&str>) -> Result<String> {
    let mut path = format!("/v3/{}?names={}", kind.endpoint(), urlencoding::encode(name));
    match kind {
        ResourceKind::App => {
            let space = space_guid.ok_or_else(|| CliError::config("no space targeted"))?;
            path.push_str("&space_guids="); path.push_str(&urlencoding::encode(space));
        }
        ResourceKind::Space => {
            let org = org_guid.ok_or_else(|| CliError::config("no org targeted"))?;
            path.push_str("&organization_guids="); path.push_str(&urlencoding::encode(org));
        }
        ResourceKind::Buildpack => {
            if let Some(s) = stack.filter(|s| !s.is_empty()) { path.push_str("&stacks="); path.push_str(&urlencoding::encode(s)); }
        }
        ResourceKind::Org | ResourceKind::Stack => {}
    }
    Ok(path)
}

pub async fn resolve(client: &CfClient, args: &ParsedArgs) -> Result<ResolvedResource> {
    let target = client.target();
    let path = lookup_path(args.kind, &args.resource_name, args.stack.as_deref(), target.org_guid.as_deref(), target.space_guid.as_deref())?;
    let body = client.get_json(&path).await?;
    let list: ResourceList = serde_json::from_value(body)
        .map_err(|e| CliError::with_source(CliErrorKind::Runtime(format!("unexpected {} listing", args.kind)), e))?;
    debug!(kind=%args.kind, name=%args.resource_name, matches=list.resources.len(), "resource.lookup");
    let guid = pick_guid(args, list.resources)?;
    info!(event="resource.resolved", kind=%args.kind, name=%args.resource_name, %guid);
    Ok(ResolvedResource { kind: args.kind, guid })
}

fn pick_guid(args: &ParsedArgs, mut found: Vec<ResourceRef>) -> Result<String> {
    let name = &args.resource_name;
    match (args.kind, found.len()) {
        (ResourceKind::Buildpack, 0) => Err(CliError::runtime(format!("no buildpacks match {name} ({})", args.stack.as_deref().unwrap_or(""))).into()),
        (ResourceKind::Buildpack, 1) => Ok(found.remove(0).guid),
        (ResourceKind::Buildpack, n) => Err(CliError::runtime(format!("too many buildpacks ({n}) match {name}")).into()),
        (kind, 0) => Err(CliError::runtime(format!("{kind} {name} not found")).into()),
        (_, _) => Ok(found.remove(0).guid),
    }
}
