//! Radial menu actions
//!
//! The core only emits an action identifier on commit; this module is
//! the external handler that executes it.

use std::process::Command;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use crate::radial::ActionItem;

pub const ACTION_COPY: &str = "copy";
pub const ACTION_EMAIL: &str = "email";

/// The actions attached to the picker's "more" button.
pub fn default_action_items() -> Vec<ActionItem> {
    vec![
        ActionItem::new(ACTION_COPY, 'C', "Copy to clipboard & close"),
        ActionItem::new(ACTION_EMAIL, '@', "Email link"),
    ]
}

/// Place text on the clipboard. Linux clipboards are owned by the
/// setting process, so give the clipboard manager a moment to take the
/// contents before we exit.
fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("opening clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("setting clipboard text")?;
    thread::sleep(Duration::from_millis(100));
    Ok(())
}

/// Execute a committed action identifier. Unknown identifiers are
/// ignored so stale ids never fail the session teardown.
pub fn dispatch(id: &str, url: &str) -> anyhow::Result<()> {
    match id {
        ACTION_COPY => {
            copy_to_clipboard(url)?;
            info!("copied link to clipboard");
        }
        ACTION_EMAIL => {
            copy_to_clipboard(url)?;
            let mailto = format!("mailto:?body={url}");
            Command::new("xdg-open")
                .arg(&mailto)
                .spawn()
                .context("opening mail client")?;
            info!("opened mail client");
        }
        other => {
            tracing::warn!(action = other, "unknown action id, ignoring");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_items_carry_known_ids() {
        let items = default_action_items();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec![ACTION_COPY, ACTION_EMAIL]);
        assert!(items.iter().all(|i| !i.tooltip.is_empty()));
    }

    #[test]
    fn unknown_action_is_ignored() {
        assert!(dispatch("shred", "https://example.org").is_ok());
    }
}
