//! Browser launching
//!
//! Resolves a catalog entry into the concrete command line for one
//! profile and spawns it detached. The picker exits right after, so
//! nothing here waits on the child.

use std::io;
use std::process::Command;

use tracing::info;

use crate::config::{BrowserEntry, ProfileEntry};

/// Fully resolved command line for one profile, minus the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchSpec {
    /// Build the spec from a catalog entry: fixed command arguments,
    /// then the profile selector, then the private flag if this is an
    /// incognito profile.
    pub fn build(entry: &BrowserEntry, profile: &ProfileEntry) -> Option<Self> {
        let mut parts = entry.command.split_whitespace().map(String::from);
        let program = parts.next()?;
        let mut args: Vec<String> = parts.collect();

        if let (Some(template), Some(id)) = (&entry.profile_arg, &profile.id) {
            for token in template.split_whitespace() {
                args.push(token.replace("{profile}", id));
            }
        }
        if profile.incognito {
            if let Some(private) = &entry.private_arg {
                args.extend(private.split_whitespace().map(String::from));
            }
        }

        Some(Self { program, args })
    }

    /// Final argument list with the URL substituted. A `{url}`
    /// placeholder in the fixed arguments is replaced in place;
    /// otherwise the URL is appended last.
    pub fn args_for(&self, url: &str) -> Vec<String> {
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| {
                if a.contains("{url}") {
                    substituted = true;
                    a.replace("{url}", url)
                } else {
                    a.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(url.to_string());
        }
        args
    }

    /// Spawn the browser and forget the child.
    pub fn spawn(&self, url: &str) -> io::Result<()> {
        let args = self.args_for(url);
        info!(program = %self.program, ?args, "launching browser");
        Command::new(&self.program).args(&args).spawn().map(|_| ())
    }
}
