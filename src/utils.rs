use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Transaction tag attached to outgoing share requests.
pub(crate) fn transaction_id(share_type: &str) -> String {
    format!("{}{}", share_type, unix_millis())
}
