//! WeChat OpenSDK bridge for Rust
//!
//! The plugin core behind a host app's WeChat integration: it keeps the app
//! identity registered with the native OpenSDK, turns host option bundles into
//! SDK requests, and pairs the asynchronous answers the WeChat app sends back
//! with the call that is waiting for them.
//!
//! ## Operations
//!
//! | Operation | Method | Result |
//! |-----------|--------|--------|
//! | OAuth login | [`WechatSession::auth`] | [`types::AuthResponse`] |
//! | Share | [`WechatSession::share`] | `()` |
//! | WeChat Pay | [`WechatSession::send_payment_request`] | `()` |
//! | Mini-program | [`WechatSession::open_mini_program`] | [`types::MiniProgramResponse`] |
//! | Invoices | [`WechatSession::choose_invoice`] | [`types::InvoiceResponse`] |
//!
//! At most one operation of each kind is in flight at a time.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wechat_open_bridge::{api::{ShareOptions, ShareType}, config::FileStore, types::Scene, WechatSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(
//!         WechatSession::builder()
//!             .sdk(Arc::new(OpenSdk::new()))
//!             .store(Arc::new(FileStore::open("wechat.json")?))
//!             .build()?,
//!     );
//!
//!     // Picks up the app id persisted by an earlier run.
//!     session.bootstrap(None, None).await;
//!
//!     let mut options = ShareOptions::new(Scene::Timeline, ShareType::Link);
//!     options.link = Some("https://example.com".to_string());
//!     session.share(options).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Host-facing option types and request builders
//! - [`config`] - Plugin configuration and persistence
//! - [`error`] - Error types
//! - [`media`] - Share media loading and thumbnails
//! - [`registry`] - Pending-operation slots
//! - [`router`] - SDK response routing
//! - [`sdk`] - Native SDK capability trait and wire types
//! - [`session`] - The session tying it together
//! - [`types`] - Identifiers, enums and result payloads
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wechat_open_bridge::WechatError;
//!
//! match session.auth(options).await {
//!     Ok(auth) => { /* exchange auth.code on your server */ }
//!     Err(WechatError::UserCancelled) => {}
//!     Err(e) => eprintln!("{}: {}", e.code(), e),
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod media;
pub mod registry;
pub mod router;
pub mod sdk;
pub mod session;
pub mod types;
mod utils;

pub use error::WechatError;
pub use session::{WechatSession, WechatSessionBuilder};
