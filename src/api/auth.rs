//! WeChat OAuth authorization
//!
//! The app asks WeChat for an authorization code which the app server then
//! exchanges for an access token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WechatError;
use crate::sdk::AuthRequest;

use super::{non_empty, parse_options, require};

/// Authorization options
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthOptions {
    /// `snsapi_userinfo` or `snsapi_login`
    #[serde(default)]
    pub scope: Option<String>,
    /// CSRF token echoed back in the response; generated when absent
    #[serde(default)]
    pub state: Option<String>,
}

impl AuthOptions {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            state: None,
        }
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, WechatError> {
        parse_options(value)
    }
}

pub fn build_auth_request(options: &AuthOptions) -> Result<AuthRequest, WechatError> {
    let scope = require(&options.scope, "Missing scope parameter.")?;
    let state = non_empty(&options.state)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Ok(AuthRequest {
        scope: scope.to_string(),
        state,
    })
}
