mod config;
mod terminal;

use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuizSettings;
use storage::QuestionSource;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

use crate::config::{Args, Command, print_usage};

struct DesktopApp {
    source: Arc<dyn QuestionSource>,
    settings: QuizSettings,
    seed: Option<u64>,
}

impl UiApp for DesktopApp {
    fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.source)
    }

    fn settings(&self) -> QuizSettings {
        self.settings
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if argv.first().is_some_and(|first| !first.starts_with('-')) {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing(parsed.verbose);
    tracing::info!(source = %parsed.source, command = ?cmd, "starting");
    let source = parsed.source.open()?;

    match cmd {
        Command::Ui => {
            let app = DesktopApp {
                source,
                settings: parsed.settings,
                seed: parsed.seed,
            };
            let context = build_app_context(Arc::new(app));

            // Some dev setups default the window to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Chapter Quiz")
                    .with_always_on_top(false),
            );

            // The desktop launcher drives its own event loop and runtime.
            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Play => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(terminal::play(source, parsed.settings, parsed.seed))
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
