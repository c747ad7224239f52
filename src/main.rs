// SPDX-License-Identifier: MPL-2.0
//! Scripted walkthrough of the toast engine.
//!
//! Prints every snapshot a rendering layer would receive while a handful of
//! toasts are added, queued, promoted, settled and dismissed.
//!
//! ```text
//! toast-demo [--max <n>] [--position <anchor>] [--config <path>]
//! ```

use std::path::PathBuf;
use std::time::Duration;
use toast_engine::config::{self, Config};
use toast_engine::notifications::{global, PromiseMessage, PromiseMessages, Toast, ToastOptions};
use tracing_subscriber::EnvFilter;

struct Flags {
    max_toasts: Option<i64>,
    position: Option<String>,
    config_path: Option<PathBuf>,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        max_toasts: args.opt_value_from_str("--max")?,
        position: args.opt_value_from_str("--position")?,
        config_path: args.opt_value_from_str("--config")?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("ignoring unexpected arguments: {rest:?}");
    }
    Ok(flags)
}

fn render(snapshot: &[Toast]) {
    let visible: Vec<String> = snapshot
        .iter()
        .filter(|t| t.is_visible())
        .map(|t| format!("[{}] {}", t.kind(), t.title()))
        .collect();
    let queued = snapshot.len() - visible.len();
    println!("visible: {} | queued: {queued}", visible.join(", "));
}

#[tokio::main]
async fn main() -> toast_engine::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("toast-demo: {err}");
            std::process::exit(2);
        }
    };

    let mut config = match &flags.config_path {
        Some(path) => config::load_from_path(path)?,
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                eprintln!("using default configuration: {warning}");
            }
            config
        }
    };
    config = Config {
        max_toasts: flags.max_toasts.or(config.max_toasts),
        position: flags.position.or(config.position),
        ..config
    };

    let toaster = global::init_with_config(&config)?;
    println!(
        "anchored at {} with at most {} visible",
        toaster.position(),
        toaster.max_toasts()
    );
    let subscription = global::subscribe(render)?;

    global::success("Registration saved", ToastOptions::new())?;
    let reminder = global::info(
        "Event starts in 10 minutes",
        ToastOptions::new().action("Open", || println!("-> opening event page")),
    )?;
    let offline = global::error(
        "Connection lost",
        ToastOptions::new()
            .message("Changes will sync later")
            .persistent(),
    )?;
    global::warning("Seats almost sold out", ToastOptions::new())?;

    let save = global::promise(
        async {
            tokio::time::sleep(Duration::from_millis(800)).await;
            Ok::<_, String>(42)
        },
        PromiseMessages::new(
            "Saving attendee list...",
            PromiseMessage::with(|n: &u32| format!("Saved {n} attendees")),
            PromiseMessage::with(|e: &String| format!("Save failed: {e}")),
        ),
    )?;
    let upload = global::promise(
        async {
            tokio::time::sleep(Duration::from_millis(400)).await;
            Err::<(), _>("quota exceeded".to_string())
        },
        PromiseMessages::new(
            "Uploading banner...",
            "Banner uploaded",
            PromiseMessage::with(|e: &String| format!("Upload failed: {e}")),
        ),
    )?;

    let (saved, uploaded) = tokio::join!(save, upload);
    println!("save -> {saved:?}, upload -> {uploaded:?}");

    global::toaster()?.trigger_action(reminder);
    global::remove_toast(offline);
    global::remove_toast(offline);

    tokio::time::sleep(Duration::from_secs(7)).await;
    subscription.unsubscribe();
    global::dispose();
    Ok(())
}
