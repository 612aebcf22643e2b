//! Configuration resolution for facewho-id
//!
//! Each setting resolves as: command-line flag → environment variable →
//! TOML file → built-in default. Flags and environment variables are both
//! handled by clap (`CliArgs`); the TOML layer is `TomlConfig`.
//!
//! The resolved `ServiceConfig` is built once at startup and shared
//! read-only by every request.

use clap::Parser;
use facewho_common::config::{normalize_base_url, require_setting, LoggingConfig};
use facewho_common::{Error, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::services::identification_client::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MAX_CANDIDATES};
use crate::workflow::{PipelinePolicy, ProviderFailurePolicy, UnrecognizedFacePolicy};

/// Module name, also the TOML file stem
pub const MODULE_NAME: &str = "facewho-id";

const DEFAULT_PORT: u16 = 5780;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
/// Face API rejects images above 6 MB
const DEFAULT_MAX_IMAGE_BYTES: usize = 6 * 1024 * 1024;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Face API upper bound for maxNumOfCandidatesReturned
const MAX_CANDIDATES_LIMIT: u32 = 100;

/// Command-line arguments for facewho-id
#[derive(Parser, Debug, Default)]
#[command(name = "facewho-id")]
#[command(about = "Identifies people in an uploaded image via a face recognition provider")]
#[command(version)]
pub struct CliArgs {
    /// TOML config file (default: <config dir>/facewho/facewho-id.toml)
    #[arg(short, long, env = "FACEWHO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Face API resource endpoint, e.g. https://westus.api.cognitive.microsoft.com
    #[arg(long, env = "FACEWHO_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Face API subscription key
    #[arg(long, env = "FACEWHO_SUBSCRIPTION_KEY", hide_env_values = true)]
    pub subscription_key: Option<String>,

    /// Person group to identify faces against
    #[arg(long, env = "FACEWHO_PERSON_GROUP_ID")]
    pub person_group_id: Option<String>,

    /// Address to bind
    #[arg(long, env = "FACEWHO_HOST")]
    pub host: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long, env = "FACEWHO_PORT")]
    pub port: Option<u16>,

    /// Largest accepted image, in bytes
    #[arg(long, env = "FACEWHO_MAX_IMAGE_BYTES")]
    pub max_image_bytes: Option<usize>,

    /// Timeout for each Face API call, in seconds
    #[arg(long, env = "FACEWHO_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// short-circuit | skip
    #[arg(long, env = "FACEWHO_UNRECOGNIZED_FACE")]
    pub unrecognized_face: Option<UnrecognizedFacePolicy>,

    /// degrade | propagate
    #[arg(long, env = "FACEWHO_PROVIDER_FAILURE")]
    pub provider_failure: Option<ProviderFailurePolicy>,
}

/// facewho-id TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub endpoint: Option<String>,
    pub subscription_key: Option<String>,
    pub person_group_id: Option<String>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub max_image_bytes: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub recognition: RecognitionToml,
    #[serde(default)]
    pub policy: PolicyToml,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[recognition]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionToml {
    pub max_candidates: Option<u32>,
    pub confidence_threshold: Option<f64>,
    pub detection_model: Option<String>,
    pub recognition_model: Option<String>,
}

/// `[policy]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyToml {
    pub unrecognized_face: Option<UnrecognizedFacePolicy>,
    pub provider_failure: Option<ProviderFailurePolicy>,
}

/// Identification request tuning
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionSettings {
    pub max_candidates: u32,
    pub confidence_threshold: f64,
    pub detection_model: Option<String>,
    pub recognition_model: Option<String>,
}

/// Fully resolved service configuration
#[derive(Clone, PartialEq)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub subscription_key: String,
    pub person_group_id: String,
    pub bind_addr: SocketAddr,
    pub max_image_bytes: usize,
    pub request_timeout: Duration,
    pub recognition: RecognitionSettings,
    pub policy: PipelinePolicy,
    pub log_level: String,
}

// Hand-written so the subscription key never reaches a log line.
impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("subscription_key", &"<redacted>")
            .field("person_group_id", &self.person_group_id)
            .field("bind_addr", &self.bind_addr)
            .field("max_image_bytes", &self.max_image_bytes)
            .field("request_timeout", &self.request_timeout)
            .field("recognition", &self.recognition)
            .field("policy", &self.policy)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ServiceConfig {
    /// Merge flags/environment over the TOML file and validate
    pub fn resolve(args: &CliArgs, toml: &TomlConfig) -> Result<Self> {
        let endpoint = require_setting(
            "Face API endpoint (--endpoint / FACEWHO_ENDPOINT / endpoint)",
            [args.endpoint.clone(), toml.endpoint.clone()],
        )?;
        let endpoint = normalize_base_url("endpoint", &endpoint)?;

        let subscription_key = require_setting(
            "Face API subscription key (--subscription-key / FACEWHO_SUBSCRIPTION_KEY / subscription_key)",
            [args.subscription_key.clone(), toml.subscription_key.clone()],
        )?;

        let person_group_id = require_setting(
            "Person group id (--person-group-id / FACEWHO_PERSON_GROUP_ID / person_group_id)",
            [args.person_group_id.clone(), toml.person_group_id.clone()],
        )?;

        let host = args.host.or(toml.host).unwrap_or(DEFAULT_HOST);
        let port = args.port.or(toml.port).unwrap_or(DEFAULT_PORT);

        let max_image_bytes = args
            .max_image_bytes
            .or(toml.max_image_bytes)
            .unwrap_or(DEFAULT_MAX_IMAGE_BYTES);
        if max_image_bytes == 0 {
            return Err(Error::Config("max_image_bytes must be positive".to_string()));
        }

        let timeout_secs = args
            .request_timeout_secs
            .or(toml.request_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }

        let recognition = RecognitionSettings {
            max_candidates: toml
                .recognition
                .max_candidates
                .unwrap_or(DEFAULT_MAX_CANDIDATES),
            confidence_threshold: toml
                .recognition
                .confidence_threshold
                .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD),
            detection_model: non_blank(toml.recognition.detection_model.clone()),
            recognition_model: non_blank(toml.recognition.recognition_model.clone()),
        };

        if !(1..=MAX_CANDIDATES_LIMIT).contains(&recognition.max_candidates) {
            return Err(Error::Config(format!(
                "recognition.max_candidates must be between 1 and {}, got {}",
                MAX_CANDIDATES_LIMIT, recognition.max_candidates
            )));
        }
        if !(0.0..=1.0).contains(&recognition.confidence_threshold) {
            return Err(Error::Config(format!(
                "recognition.confidence_threshold must be within [0, 1], got {}",
                recognition.confidence_threshold
            )));
        }

        let policy = PipelinePolicy {
            unrecognized_face: args
                .unrecognized_face
                .or(toml.policy.unrecognized_face)
                .unwrap_or_default(),
            provider_failure: args
                .provider_failure
                .or(toml.policy.provider_failure)
                .unwrap_or_default(),
        };

        Ok(Self {
            endpoint,
            subscription_key,
            person_group_id,
            bind_addr: SocketAddr::new(host, port),
            max_image_bytes,
            request_timeout: Duration::from_secs(timeout_secs),
            recognition,
            policy,
            log_level: toml.logging.level.clone(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
