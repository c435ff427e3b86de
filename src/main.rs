//! linkpick binary
//!
//! Parses the command line, loads config and catalog, runs one picker
//! window, then acts on the outcome: spawn the chosen browser profile
//! with the link, or dispatch the chosen link action.

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use linkpick::actions;
use linkpick::catalog::Catalog;
use linkpick::config::{read_browsers, PickerConfig, PickerStyle};
use linkpick::session::{PickerSession, SessionEvent};
use linkpick::ui::{PickOutcome, PickerWindow};

const USAGE: &str = "\
Usage: linkpick [OPTIONS] [URL]

Open a picker window and launch URL in the chosen browser profile.

Options:
  --style <glass|cards|two-level>  Override the configured picker style
  --print-catalog                  List configured browsers and exit
  --version                        Print version and exit
  --help                           Print this help and exit
";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if args.iter().any(|a| a == "--version") {
        println!("linkpick {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let mut config = PickerConfig::load();

    if let Some(pos) = args.iter().position(|a| a == "--style") {
        match args.get(pos + 1).and_then(|s| PickerStyle::parse(s)) {
            Some(style) => config.style = style,
            None => {
                eprintln!("--style expects glass, cards or two-level");
                return ExitCode::FAILURE;
            }
        }
    }

    let entries = match read_browsers(None) {
        Ok(entries) => entries,
        Err(e) => {
            error!("failed to read browser catalog: {e}");
            return ExitCode::FAILURE;
        }
    };
    let catalog = Catalog::build(&entries);

    if args.iter().any(|a| a == "--print-catalog") {
        for browser in catalog.browsers() {
            println!("{}", browser.name);
            for profile in &browser.profiles {
                let mark = if profile.incognito { " (private)" } else { "" };
                println!("  {}{mark}", profile.name);
            }
        }
        return ExitCode::SUCCESS;
    }

    if catalog.is_empty() {
        eprintln!("no browsers configured; nothing to pick from");
        return ExitCode::FAILURE;
    }

    // Skip the --style value when looking for the positional URL.
    let style_value = args
        .iter()
        .position(|a| a == "--style")
        .map(|pos| pos + 1);
    let url = args
        .iter()
        .enumerate()
        .find(|(i, a)| !a.starts_with("--") && Some(*i) != style_value)
        .map(|(_, a)| a.clone())
        .unwrap_or_default();

    match run_picker(catalog, config, url) {
        Ok(code) => code,
        Err(e) => {
            error!("picker failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_picker(catalog: Catalog, config: PickerConfig, url: String) -> anyhow::Result<ExitCode> {
    // The session takes the catalog; keep a copy to resolve the pick.
    let lookup = catalog.clone();
    let session = PickerSession::new(catalog, &config);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([760.0, 560.0])
        .with_min_inner_size([480.0, 360.0])
        .with_decorations(false)
        .with_transparent(true)
        .with_title("linkpick");
    if config.always_on_top {
        viewport = viewport.with_window_level(egui::WindowLevel::AlwaysOnTop);
    }
    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };

    let result: Arc<Mutex<Option<PickOutcome>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&result);
    let close_on_focus_loss = config.close_on_focus_loss;

    eframe::run_native(
        "linkpick",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PickerWindow::new(
                session,
                url,
                close_on_focus_loss,
                slot,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))?;

    let outcome = result
        .lock()
        .map_err(|_| anyhow::anyhow!("result slot poisoned"))?
        .take();
    dispatch(outcome, &lookup)
}

fn dispatch(outcome: Option<PickOutcome>, catalog: &Catalog) -> anyhow::Result<ExitCode> {
    match outcome {
        Some(PickOutcome {
            event: SessionEvent::Picked { group, item },
            url,
        }) => {
            let Some(profile) = catalog.profile(group, item) else {
                anyhow::bail!("picked profile {group}/{item} not in catalog");
            };
            info!(profile = %profile.name, "launching");
            profile.launch.spawn(&url)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(PickOutcome {
            event: SessionEvent::Action(id),
            url,
        }) => {
            actions::dispatch(&id, &url)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(PickOutcome {
            event: SessionEvent::Dismissed,
            ..
        })
        | None => {
            info!("dismissed without a decision");
            Ok(ExitCode::FAILURE)
        }
    }
}
