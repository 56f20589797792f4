//! Response routing
//!
//! Every SDK callback enters through [`route_response`], is classified by its
//! body, and is delivered to the matching registry slot. Callbacks with no
//! pending operation are dropped.

use log::{debug, warn};

use crate::api::invoice::map_invoice_cards;
use crate::error::WechatError;
use crate::registry::PendingRegistry;
use crate::sdk::{
    ResponseBody, SdkResponse, ERR_AUTH_DENIED, ERR_SENT_FAILED, ERR_UNSUPPORT, ERR_USER_CANCEL,
};
use crate::types::{AuthResponse, OperationKind};

/// Map a non-success SDK status code to a bridge error.
pub fn map_error_code(code: i32) -> WechatError {
    match code {
        ERR_USER_CANCEL => WechatError::UserCancelled,
        ERR_AUTH_DENIED => WechatError::invalid("Authorization denied."),
        ERR_UNSUPPORT => WechatError::invalid("Operation not supported."),
        ERR_SENT_FAILED => WechatError::RequestFailed,
        other => WechatError::Unknown(other),
    }
}

/// Kind a response body answers, `None` for untracked kinds.
pub fn classify(body: &ResponseBody) -> Option<OperationKind> {
    match body {
        ResponseBody::Auth { .. } => Some(OperationKind::Auth),
        ResponseBody::Share => Some(OperationKind::Share),
        ResponseBody::Payment => Some(OperationKind::Payment),
        ResponseBody::LaunchMiniProgram { .. } => Some(OperationKind::MiniProgram),
        ResponseBody::ChooseInvoice { .. } => Some(OperationKind::Invoice),
        ResponseBody::Other { .. } => None,
    }
}

/// Deliver `response` to its pending operation.
///
/// Returns `true` if a pending operation consumed it.
pub fn route_response(registry: &PendingRegistry, response: SdkResponse) -> bool {
    let Some(kind) = classify(&response.body) else {
        debug!("[WechatBridge] ignoring untracked response {:?}", response.body);
        return false;
    };

    if !response.is_success() {
        if let Some(err_str) = &response.err_str {
            debug!(
                "[WechatBridge] {} failed with code {}: {}",
                kind, response.err_code, err_str
            );
        }
        let delivered = registry.fail(kind, map_error_code(response.err_code));
        if !delivered {
            warn!(
                "[WechatBridge] no pending {} operation for error code {}",
                kind, response.err_code
            );
        }
        return delivered;
    }

    let delivered = match response.body {
        ResponseBody::Auth { code, state } => registry.auth.complete(Ok(AuthResponse {
            code: code.unwrap_or_default(),
            state,
        })),
        ResponseBody::Share => registry.share.complete(Ok(())),
        ResponseBody::Payment => registry.payment.complete(Ok(())),
        ResponseBody::LaunchMiniProgram { ext_msg } => registry.mini_program.complete(Ok(ext_msg)),
        ResponseBody::ChooseInvoice { cards } => {
            registry.invoice.complete(Ok(map_invoice_cards(&cards)))
        }
        ResponseBody::Other { .. } => false,
    };

    if !delivered {
        debug!("[WechatBridge] dropping {} response with no pending operation", kind);
    }
    delivered
}
