//! REST client for the Orienta backend.
//!
//! `ApiClient` owns the transport; the `Http*` types implement the
//! service traits of `orienta-core` on top of it and share its session
//! cookie.

pub mod api_client;
pub mod auth_api;
pub mod dto;
pub mod guide_api;
pub mod status_api;

pub use api_client::ApiClient;
pub use auth_api::HttpAuthService;
pub use guide_api::HttpGuideRepository;
pub use status_api::HttpStatusService;
