use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WechatError;

/// Kinds of request that can be outstanding against the native SDK.
///
/// At most one operation of each kind is pending at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Auth,
    Share,
    Payment,
    MiniProgram,
    Invoice,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Auth,
        OperationKind::Share,
        OperationKind::Payment,
        OperationKind::MiniProgram,
        OperationKind::Invoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Auth => "auth",
            OperationKind::Share => "share",
            OperationKind::Payment => "payment",
            OperationKind::MiniProgram => "miniProgram",
            OperationKind::Invoice => "invoice",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target surface for a shared message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Chat session
    Session,
    /// Moments
    Timeline,
    Favorite,
}

impl Scene {
    pub fn code(&self) -> i32 {
        match self {
            Scene::Session => 0,
            Scene::Timeline => 1,
            Scene::Favorite => 2,
        }
    }
}

impl TryFrom<i64> for Scene {
    type Error = WechatError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Scene::Session),
            1 => Ok(Scene::Timeline),
            2 => Ok(Scene::Favorite),
            other => Err(WechatError::invalid(format!("Unsupported share scene {other}."))),
        }
    }
}

/// Build flavour of a mini-program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MiniProgramType {
    #[default]
    Release,
    Test,
    Preview,
}

impl MiniProgramType {
    /// Unknown values fall back to [`MiniProgramType::Release`].
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => MiniProgramType::Test,
            Some(2) => MiniProgramType::Preview,
            _ => MiniProgramType::Release,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            MiniProgramType::Release => 0,
            MiniProgramType::Test => 1,
            MiniProgramType::Preview => 2,
        }
    }
}
