//! Raw argument processing for the annotation subcommands.
//!
//! Arguments after the subcommand are handed over untouched by clap so that
//! `-s/--stack`, `key=value` pairs and stray options can be told apart here.
use crate::errors::CliError;
use crate::metadata::MetadataDocument;
use std::fmt;
use tracing::debug;

pub const USAGE: &str = "cf-annotations set-annotation resource-type resource-name annotations...\n\
cf-annotations unset-annotation resource-type resource-name annotation-names...\n\
cf-annotations annotations resource-type resource-name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind { App, Org, Space, Stack, Buildpack }

impl ResourceKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "app" => Some(Self::App),
            "org" => Some(Self::Org),
            "space" => Some(Self::Space),
            "stack" => Some(Self::Stack),
            "buildpack" => Some(Self::Buildpack),
            _ => None,
        }
    }
    pub fn as_str(self) -> &'static str { match self { Self::App => "app", Self::Org => "org", Self::Space => "space", Self::Stack => "stack", Self::Buildpack => "buildpack" } }
    /// Collection name under `/v3`.
    pub fn endpoint(self) -> &'static str { match self { Self::App => "apps", Self::Org => "organizations", Self::Space => "spaces", Self::Stack => "stacks", Self::Buildpack => "buildpacks" } }
}

impl fmt::Display for ResourceKind { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) } }

/// Which subcommand the arguments belong to; decides how bare tokens are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode { Set, Unset, View }

impl Mode {
    fn min_args(self) -> usize { match self { Self::Set | Self::Unset => 3, Self::View => 2 } }

    fn check_key(self, tok: &str, m: &mut MetadataDocument) -> Result<(), CliError> {
        let idx = tok.find('=');
        debug!(token=%tok, eq_at=?idx, "args.key_check");
        match self {
            Self::Set => match idx {
                None => Err(CliError::usage(format!("no value part given for annotation '{tok}'"))),
                Some(0) => Err(CliError::usage(format!("no key part given for annotation '{tok}'"))),
                Some(i) => { m.set_annotation(&tok[..i], &tok[i + 1..]); Ok(()) }
            },
            Self::Unset => match idx {
                Some(_) => Err(CliError::usage(format!("annotation key '{tok}' cannot contain an '='"))),
                None => { m.unset_annotation(tok); Ok(()) }
            },
            Self::View => { m.unset_annotation(tok); Ok(()) }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    /// Resource type as the user typed it.
    pub resource_type: String,
    pub kind: ResourceKind,
    pub resource_name: String,
    pub stack: Option<String>,
    pub metadata: MetadataDocument,
}

pub fn parse(mode: Mode, raw: &[String]) -> Result<ParsedArgs, CliError> {
    if raw.len() < mode.min_args() { return Err(CliError::usage(format!("usage:\n{USAGE}"))); }
    let resource_type = raw[0].clone();
    let kind = ResourceKind::parse(&resource_type)
        .ok_or_else(|| CliError::usage(format!("not a valid resource type: {resource_type}")))?;
    let resource_name = raw[1].clone();

    let mut metadata = MetadataDocument::default();
    let mut stack = None;
    let mut rest = raw[2..].iter();
    while let Some(tok) = rest.next() {
        if tok == "-s" || tok == "--stack" {
            if kind != ResourceKind::Buildpack { return Err(CliError::usage(format!("--stack not allowed with type {kind}"))); }
            let value = rest.next().ok_or_else(|| CliError::usage(format!("No stack for option '{tok}'")))?;
            stack = Some(value.clone());
        } else if tok.starts_with('-') {
            return Err(CliError::usage(format!("invalid option of '{tok}'")));
        } else if !tok.is_empty() {
            mode.check_key(tok, &mut metadata)?;
        }
    }

    let count = metadata.annotations().len();
    match mode {
        Mode::Set | Mode::Unset if count == 0 => return Err(CliError::usage("no annotations specified")),
        Mode::View if count != 0 => return Err(CliError::usage("extra arguments specified")),
        _ => {}
    }
    Ok(ParsedArgs { resource_type, kind, resource_name, stack, metadata })
}
