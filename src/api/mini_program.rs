use serde::{Deserialize, Serialize};

use crate::error::WechatError;
use crate::sdk::LaunchMiniProgramRequest;
use crate::types::MiniProgramType;

use super::{non_empty, parse_options, require};

/// Options for launching a mini-program.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MiniProgramOptions {
    /// Original ID, `gh_...`
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    /// 0 = release, 1 = test, 2 = preview
    #[serde(default, rename = "type")]
    pub program_type: Option<i64>,
}

impl MiniProgramOptions {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, WechatError> {
        parse_options(value)
    }
}

pub fn build_launch_request(
    options: &MiniProgramOptions,
) -> Result<LaunchMiniProgramRequest, WechatError> {
    let username = require(&options.username, "username is required.")?;

    Ok(LaunchMiniProgramRequest {
        username: username.to_string(),
        path: non_empty(&options.path).map(str::to_string),
        program_type: MiniProgramType::from_code(options.program_type),
    })
}
