//! OAuth token exchange
//!
//! Exchanges the temporary `code` from Slack's OAuth redirect for tokens via
//! `oauth.access` (classic apps) or `oauth.v2.access`.

use crate::client::{http_client, send, DEFAULT_BASE_URL};
use crate::error::Result;
use crate::types::{OAuthResponse, OAuthV2Response};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument};

/// Client credentials and redirect code for one exchange
#[derive(Clone, Serialize)]
pub struct OAuthRequest<'a> {
    /// App client ID
    pub client_id: &'a str,
    /// App client secret
    pub client_secret: &'a str,
    /// Code from the redirect
    pub code: &'a str,
    /// Redirect URI used in the authorize step
    pub redirect_uri: &'a str,
}

impl std::fmt::Debug for OAuthRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthRequest")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

/// Unauthenticated client for the OAuth endpoints
#[derive(Debug, Clone)]
pub struct OAuthClient {
    client: Client,
    base_url: String,
}

impl OAuthClient {
    /// Create an OAuth client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Set a custom base URL (for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// `oauth.access`
    #[instrument(skip(self))]
    pub async fn get_oauth_response(&self, request: &OAuthRequest<'_>) -> Result<OAuthResponse> {
        let response: OAuthResponse = send(
            "oauth.access",
            self.client
                .post(format!("{}/oauth.access", self.base_url))
                .form(request),
        )
        .await?;

        info!(team_id = %response.team_id, scope = %response.scope, "OAuth exchange complete");
        Ok(response)
    }

    /// `oauth.access`, returning only `(access_token, scope)`
    pub async fn get_oauth_token(&self, request: &OAuthRequest<'_>) -> Result<(String, String)> {
        let response = self.get_oauth_response(request).await?;
        Ok((response.access_token, response.scope))
    }

    /// `oauth.v2.access`
    #[instrument(skip(self))]
    pub async fn get_oauth_v2_response(
        &self,
        request: &OAuthRequest<'_>,
    ) -> Result<OAuthV2Response> {
        let response: OAuthV2Response = send(
            "oauth.v2.access",
            self.client
                .post(format!("{}/oauth.v2.access", self.base_url))
                .form(request),
        )
        .await?;

        info!(
            team_id = %response.team.id,
            app_id = %response.app_id,
            "OAuth v2 exchange complete"
        );
        Ok(response)
    }
}
