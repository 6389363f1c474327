//! Interactive token collection at startup
//!
//! Repeatedly asks for a new bearer token. A literal `n` (case-insensitive)
//! ends collection and starts the rotation; blank lines are ignored; any
//! other input is trimmed and saved as a new token. Reaching end of input
//! ends collection the same way as `n` so piped stdin works.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use openloop_api::TokenStore;

/// What one line of prompt input means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    /// End collection and start the driver
    Start,
    /// Persist this value as a new token
    Save(String),
    /// Blank input, ask again
    Ignore,
}

/// Classify one line of user input.
pub fn classify(input: &str) -> PromptAction {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("n") {
        PromptAction::Start
    } else if trimmed.is_empty() {
        PromptAction::Ignore
    } else {
        PromptAction::Save(trimmed.to_owned())
    }
}

/// Run the collection loop over the given input, saving into the store.
///
/// Returns the number of tokens saved during this session.
pub async fn collect_tokens<R: BufRead>(mut input: R, store: &TokenStore) -> Result<usize> {
    let mut saved = 0;
    loop {
        print!(
            "{}",
            "Input new bearer token (or type \"n\" to start): ".magenta()
        );
        std::io::stdout().flush().context("flushing prompt")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("reading prompt input")?;
        if read == 0 {
            // EOF
            break;
        }

        match classify(&line) {
            PromptAction::Start => break,
            PromptAction::Save(token) => {
                store
                    .save(&token)
                    .await
                    .context("saving new token")?;
                println!("{}", "new token saved".green());
                saved += 1;
            }
            PromptAction::Ignore => {}
        }
    }
    Ok(saved)
}
