//! `slackline parse`

use crate::server::load_config;
use anyhow::{bail, Context, Result};
use slackline_events::{
    no_verify_token, parse_event, verify_token, EventsApiEvent, ParseOption, TokenComparator,
};
use std::io::Read;
use std::path::Path;

/// Parse a payload and render the result.
///
/// Failures render as an `unmarshalling_error` event alongside the error.
fn render(raw: &str, options: &[ParseOption]) -> (String, Option<slackline_events::Error>) {
    let (event, err) = match parse_event(raw, options) {
        Ok(event) => (event, None),
        Err(e) => (EventsApiEvent::unmarshalling_error(&e), Some(e)),
    };
    let json = serde_json::to_string_pretty(&event)
        .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"));
    (json, err)
}

pub fn run(file: Option<&Path>, no_verify: bool) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let options = if no_verify {
        vec![no_verify_token()]
    } else {
        let config = load_config()?;
        if config.slack.verification_token.is_empty() {
            bail!("slack.verification_token is not set; pass --no-verify to skip the check");
        }
        vec![verify_token(TokenComparator::new(
            config.slack.verification_token,
        ))]
    };

    let (json, err) = render(&raw, &options);
    println!("{json}");
    match err {
        Some(e) => Err(e).context("Failed to parse event"),
        None => Ok(()),
    }
}
