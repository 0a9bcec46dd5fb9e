use anyhow::{Result, Context};
use crate::errors::{CliError, CliErrorKind};
use tracing::debug;
use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}, time::Duration};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `config.toml` owned by this tool.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_endpoint: Option<String>,
    pub access_token: Option<String>,
    pub skip_ssl_validation: Option<bool>,
    pub request_timeout_secs: Option<u64>,
    pub org_guid: Option<String>,
    pub space_guid: Option<String>,
}

/// Subset of the platform CLI's `config.json` (target, token, targeted org/space).
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct CfCliConfig {
    pub target: String,
    pub access_token: String,
    #[serde(rename = "SSLDisableCertificateCheck")]
    pub ssl_disable_certificate_check: bool,
    pub organization_fields: CfCliTargetFields,
    pub space_fields: CfCliTargetFields,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CfCliTargetFields {
    #[serde(rename = "GUID")]
    pub guid: String,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub api_endpoint: Option<String>,
    pub access_token: Option<String>,
    pub skip_ssl_validation: bool,
    pub request_timeout: Duration,
    pub org_guid: Option<String>,
    pub space_guid: Option<String>,
}

/// Everything needed to talk to one API endpoint as one user.
#[derive(Debug, Clone)]
pub struct Target {
    pub api_endpoint: String,
    pub access_token: String,
    pub skip_ssl_validation: bool,
    pub request_timeout: Duration,
    pub org_guid: Option<String>,
    pub space_guid: Option<String>,
}

impl EffectiveConfig {
    pub fn load() -> Result<Self> {
        let cf_cfg = load_cf_cli_config(&cf_cli_config_path())?;
        let file_cfg = load_file_config(&config_file_path())?;
        let mut cfg = Self::merge(file_cfg, cf_cfg);
        cfg.apply_env();
        debug!(api=?cfg.api_endpoint, has_token=cfg.access_token.is_some(), org=?cfg.org_guid, space=?cfg.space_guid, "config.effective");
        Ok(cfg)
    }

    /// Values from our own file win over the platform CLI's.
    pub fn merge(file: FileConfig, cf: CfCliConfig) -> Self {
        Self {
            api_endpoint: non_empty(file.api_endpoint).or_else(|| non_empty(Some(cf.target))),
            access_token: non_empty(file.access_token).or_else(|| non_empty(Some(cf.access_token))),
            skip_ssl_validation: file.skip_ssl_validation.unwrap_or(cf.ssl_disable_certificate_check),
            request_timeout: Duration::from_secs(file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            org_guid: non_empty(file.org_guid).or_else(|| non_empty(Some(cf.organization_fields.guid))),
            space_guid: non_empty(file.space_guid).or_else(|| non_empty(Some(cf.space_fields.guid))),
        }
    }

    fn apply_env(&mut self) {
        if let Some(api) = env_non_empty("CF_ANNOTATIONS_API") { self.api_endpoint = Some(api); }
        if let Some(token) = env_non_empty("CF_ANNOTATIONS_TOKEN") { self.access_token = Some(token); }
        if let Some(v) = env_non_empty("CF_ANNOTATIONS_SKIP_SSL_VALIDATION") { self.skip_ssl_validation = v=="1" || v.eq_ignore_ascii_case("true"); }
        if let Some(secs) = env_non_empty("CF_ANNOTATIONS_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) { self.request_timeout = Duration::from_secs(secs); }
    }

    pub fn target(&self) -> Result<Target> {
        let api_endpoint = self.api_endpoint.clone()
            .ok_or_else(|| CliError::config("no API endpoint set (log in with the platform CLI or set CF_ANNOTATIONS_API)"))?;
        let access_token = self.access_token.clone()
            .ok_or_else(|| CliError::config("not logged in (no access token found; set CF_ANNOTATIONS_TOKEN)"))?;
        Ok(Target {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            access_token,
            skip_ssl_validation: self.skip_ssl_validation,
            request_timeout: self.request_timeout,
            org_guid: self.org_guid.clone(),
            space_guid: self.space_guid.clone(),
        })
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    debug!(path=?path, exists=?path.exists(), "config.load.attempt");
    if !path.exists() { return Ok(FileConfig::default()); }
    let content = fs::read_to_string(path).with_context(|| format!("read config {path:?}"))
        .map_err(|e| CliError::with_source(CliErrorKind::Config("failed to read config".into()), e))?;
    match toml::from_str(&content) {
        Ok(v) => { debug!("config.parse.success"); Ok(v) }
        Err(e) => { debug!(error=?e, "config.parse.error"); Err(CliError::with_source(CliErrorKind::Config("failed to parse config".into()), e).into()) }
    }
}

fn load_cf_cli_config(path: &Path) -> Result<CfCliConfig> {
    debug!(path=?path, exists=?path.exists(), "cf_config.load.attempt");
    if !path.exists() { return Ok(CfCliConfig::default()); }
    let content = fs::read_to_string(path).with_context(|| format!("read platform CLI config {path:?}"))
        .map_err(|e| CliError::with_source(CliErrorKind::Config("failed to read platform CLI config".into()), e))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::with_source(CliErrorKind::Config("failed to parse platform CLI config".into()), e).into())
}

fn non_empty(v: Option<String>) -> Option<String> { v.filter(|s| !s.trim().is_empty()) }
fn env_non_empty(key: &str) -> Option<String> { non_empty(std::env::var(key).ok()) }

pub fn config_dir() -> PathBuf { dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("cf-annotations") }
pub fn config_file_path() -> PathBuf { config_dir().join("config.toml") }

/// `$CF_HOME/.cf/config.json`, falling back to the home directory.
pub fn cf_cli_config_path() -> PathBuf {
    let home = std::env::var_os("CF_HOME").map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".cf").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_file_wins_over_platform_cli() {
        let cf: CfCliConfig = serde_json::from_str(r#"{
            "ConfigVersion": 3,
            "Target": "https://api.cf.example",
            "AccessToken": "bearer abc",
            "SSLDisableCertificateCheck": true,
            "OrganizationFields": {"GUID": "org-1", "Name": "o"},
            "SpaceFields": {"GUID": "space-1", "Name": "s", "AllowSSH": true}
        }"#).unwrap();
        let file = FileConfig { api_endpoint: Some("https://other.example".into()), skip_ssl_validation: Some(false), ..Default::default() };
        let cfg = EffectiveConfig::merge(file, cf);
        assert_eq!(cfg.api_endpoint.as_deref(), Some("https://other.example"));
        assert_eq!(cfg.access_token.as_deref(), Some("bearer abc"));
        assert!(!cfg.skip_ssl_validation);
        assert_eq!(cfg.org_guid.as_deref(), Some("org-1"));
        assert_eq!(cfg.space_guid.as_deref(), Some("space-1"));
        assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn logged_out_platform_cli_has_no_token() {
        let cf: CfCliConfig = serde_json::from_str(r#"{"Target": "https://api.cf.example", "AccessToken": ""}"#).unwrap();
        let cfg = EffectiveConfig::merge(FileConfig::default(), cf);
        let err = cfg.target().unwrap_err();
        assert!(format!("{err}").contains("not logged in"));
    }

    #[test]
    fn target_trims_trailing_slash() {
        let file = FileConfig { api_endpoint: Some("http://127.0.0.1:9/".into()), access_token: Some("t".into()), ..Default::default() };
        let t = EffectiveConfig::merge(file, CfCliConfig::default()).target().unwrap();
        assert_eq!(t.api_endpoint, "http://127.0.0.1:9");
    }
}
