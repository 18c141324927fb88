//! Slackline API - Slack Web API client
//!
//! Request/response wrappers for the handful of Web API methods slackline
//! uses: OAuth token exchange, channel listing, message posting and opening
//! direct messages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod oauth;
pub mod types;

pub use client::{SlackClient, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use oauth::{OAuthClient, OAuthRequest};
pub use types::{
    Channel, OAuthResponse, OAuthResponseBot, OAuthResponseIncomingWebhook, OAuthV2Response,
    OAuthV2ResponseAuthedUser, OAuthV2ResponseEnterprise, OAuthV2ResponseTeam,
    PostMessageParameters, Topic,
};
