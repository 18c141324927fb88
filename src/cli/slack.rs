//! Web API subcommands

use crate::server::config::SlackSettings;
use crate::server::load_config;
use anyhow::{bail, Context, Result};
use slackline_api::{OAuthClient, OAuthRequest, PostMessageParameters, SlackClient};
use tracing::info;

fn bot_client(settings: &SlackSettings) -> Result<SlackClient> {
    if settings.bot_token.is_empty() {
        bail!("slack.bot_token is not set (SLACKLINE_SLACK__BOT_TOKEN)");
    }
    Ok(SlackClient::new(settings.bot_token.clone())
        .context("Failed to create Slack client")?
        .with_base_url(settings.api_base_url.clone()))
}

/// `slackline channels`
pub async fn channels(exclude_archived: bool) -> Result<()> {
    let config = load_config()?;
    let client = bot_client(&config.slack)?;

    let channels = client
        .get_channels(exclude_archived)
        .await
        .context("conversations.list failed")?;

    for channel in &channels {
        let marker = if channel.is_archived { " (archived)" } else { "" };
        println!("{}\t#{}{}", channel.id, channel.name, marker);
    }
    info!(count = channels.len(), "Listed channels");
    Ok(())
}

/// `slackline im <user> <text>`
pub async fn im(user: &str, text: &str) -> Result<()> {
    let config = load_config()?;
    let client = bot_client(&config.slack)?;

    let (_, already_open, channel_id) = client
        .open_im_channel(user)
        .await
        .context("conversations.open failed")?;
    info!(user = %user, channel = %channel_id, already_open, "Opened IM channel");

    let (channel, ts) = client
        .post_message(&channel_id, &PostMessageParameters::text(text))
        .await
        .context("chat.postMessage failed")?;

    println!("Message sent to {channel} at {ts}");
    Ok(())
}

/// `slackline oauth <code>`
pub async fn oauth(code: &str, redirect_uri: &str, v2: bool) -> Result<()> {
    let config = load_config()?;
    let slack = &config.slack;
    if slack.client_id.is_empty() || slack.client_secret.is_empty() {
        bail!("slack.client_id and slack.client_secret must be set");
    }

    let client = OAuthClient::new()
        .context("Failed to create OAuth client")?
        .with_base_url(slack.api_base_url.clone());
    let request = OAuthRequest {
        client_id: &slack.client_id,
        client_secret: &slack.client_secret,
        code,
        redirect_uri,
    };

    let output = if v2 {
        let response = client
            .get_oauth_v2_response(&request)
            .await
            .context("oauth.v2.access failed")?;
        serde_json::to_string_pretty(&response)?
    } else {
        let response = client
            .get_oauth_response(&request)
            .await
            .context("oauth.access failed")?;
        serde_json::to_string_pretty(&response)?
    };

    println!("{output}");
    Ok(())
}
