//! linkpick
//!
//! A modal browser and profile picker. Invoked with a link, it shows
//! every configured browser profile as a card grid (or a two-level
//! browser bar with an expanding profile grid), lets the user pick one
//! by pointer or digit key, and launches the link there. A small
//! radial menu offers link actions like copy and email.
//!
//! The crate splits into a pure, headless core (`layout`, `selection`,
//! `radial`, `connection`, `session`) that is fully unit-tested, and a
//! thin eframe shell (`ui`, `main`) that feeds it input and paints its
//! output.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod connection;
pub mod icons;
pub mod launch;
pub mod layout;
pub mod radial;
pub mod selection;
pub mod session;
pub mod style;
pub mod ui;

pub use catalog::Catalog;
pub use config::{PickerConfig, PickerStyle};
pub use session::{PickerSession, SessionEvent};
