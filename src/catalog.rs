//! Session catalog
//!
//! The read-only model the picker presents: browsers (groups) owning
//! ordered profiles (pickable items). Hidden entries are filtered out
//! here, once, so the layout and selection machinery never see them;
//! a browser left with no visible profiles is dropped entirely.

use crate::config::{BrowserEntry, ProfileEntry};
use crate::launch::LaunchSpec;

/// One selectable profile. Immutable once the catalog is built.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    /// Icon name or path; falls back to the browser icon, then to an
    /// initial-letter placeholder
    pub icon: Option<String>,
    pub incognito: bool,
    /// Index of the owning browser within the catalog
    pub browser: usize,
    pub launch: LaunchSpec,
}

/// One browser with its visible profiles, in display order. Display
/// order is also keyboard-shortcut order.
#[derive(Debug, Clone)]
pub struct Browser {
    pub name: String,
    pub icon: Option<String>,
    pub profiles: Vec<Profile>,
}

/// Ordered, filtered catalog for one picker session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    browsers: Vec<Browser>,
    /// Flattened (browser, profile) index pairs in display order
    flat: Vec<(usize, usize)>,
}

impl Catalog {
    /// Build the catalog from config entries, skipping hidden browsers
    /// and profiles. A browser with no listed profiles gets a single
    /// synthesized default profile so it still shows up as one card.
    pub fn build(entries: &[BrowserEntry]) -> Self {
        let mut browsers = Vec::new();

        for entry in entries {
            if entry.hidden {
                continue;
            }

            let browser_idx = browsers.len();
            let visible: Vec<&ProfileEntry> =
                entry.profiles.iter().filter(|p| !p.hidden).collect();

            let profiles: Vec<Profile> = if visible.is_empty() && entry.profiles.is_empty() {
                let default = ProfileEntry {
                    name: "Default".into(),
                    id: None,
                    icon: None,
                    incognito: false,
                    hidden: false,
                };
                LaunchSpec::build(entry, &default)
                    .map(|launch| Profile {
                        name: default.name.clone(),
                        icon: entry.icon.clone(),
                        incognito: false,
                        browser: browser_idx,
                        launch,
                    })
                    .into_iter()
                    .collect()
            } else {
                visible
                    .into_iter()
                    .filter_map(|p| {
                        let launch = LaunchSpec::build(entry, p)?;
                        Some(Profile {
                            name: p.name.clone(),
                            icon: p.icon.clone().or_else(|| entry.icon.clone()),
                            incognito: p.incognito,
                            browser: browser_idx,
                            launch,
                        })
                    })
                    .collect()
            };

            if profiles.is_empty() {
                continue;
            }
            browsers.push(Browser {
                name: entry.name.clone(),
                icon: entry.icon.clone(),
                profiles,
            });
        }

        let flat = browsers
            .iter()
            .enumerate()
            .flat_map(|(b, browser)| (0..browser.profiles.len()).map(move |p| (b, p)))
            .collect();

        Self { browsers, flat }
    }

    pub fn browsers(&self) -> &[Browser] {
        &self.browsers
    }

    /// Flattened (browser, profile) pairs in display order.
    pub fn flat(&self) -> &[(usize, usize)] {
        &self.flat
    }

    /// Total visible profile count.
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Visible profile count per browser, in display order.
    pub fn group_sizes(&self) -> Vec<usize> {
        self.browsers.iter().map(|b| b.profiles.len()).collect()
    }

    pub fn browser(&self, idx: usize) -> Option<&Browser> {
        self.browsers.get(idx)
    }

    pub fn profile(&self, browser: usize, profile: usize) -> Option<&Profile> {
        self.browsers.get(browser)?.profiles.get(profile)
    }

    /// Resolve a flat index back to its (browser, profile) pair.
    pub fn flat_pair(&self, idx: usize) -> Option<(usize, usize)> {
        self.flat.get(idx).copied()
    }
}
