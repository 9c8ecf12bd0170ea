mod cli;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use portal_app::auth::{self, display_first_name};
use portal_app::chat::{self, ChatEntry, ChatPresenter, Sender, SUGGESTED_QUESTIONS};
use portal_app::dotenv;
use portal_app::locations::{self, LOCATIONS};
use portal_common::{NotificationKind, NotificationSink, PortalError};
use portal_config::PortalConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

/// Prints notifications to stderr, keeping stdout for replies.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, message: &str, kind: NotificationKind) {
        eprintln!("[{}] {message}", kind.title());
    }
}

fn init_logging(args: &Args, config: &PortalConfig) {
    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| format!("portal={}", config.logging.level.as_str()));

    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(d) => filter.add_directive(d),
        Err(e) => {
            eprintln!("Invalid log level {directive:?} ({e}), using info");
            filter.add_directive(LevelFilter::INFO.into())
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // Before the runtime spawns worker threads.
    dotenv::load(Path::new(".env"));

    let args = cli::parse();

    let (config, fallback) = match portal_config::load_startup_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&args, &config);

    tracing::info!("Smart Services Portal v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = fallback {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args.command, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: PortalConfig) -> portal_common::Result<()> {
    let notifier: Arc<dyn NotificationSink> = Arc::new(ConsoleSink);

    match command {
        Command::Chat {
            once,
            email,
            password,
        } => run_chat(&config, notifier, once, &email, &password).await,
        Command::Locations { center } => run_locations(center.as_deref(), notifier.as_ref()),
        Command::Config => {
            println!("{}", portal_config::config_to_json(&config));
            Ok(())
        }
    }
}

fn print_entry(entry: &ChatEntry) {
    match entry.sender {
        Sender::User => println!("you: {}", entry.text),
        Sender::Bot => println!("assistant: {}", entry.text),
    }
}

async fn run_chat(
    config: &PortalConfig,
    notifier: Arc<dyn NotificationSink>,
    once: Option<String>,
    email: &str,
    password: &str,
) -> portal_common::Result<()> {
    // The assistant is only reachable with a signed-in user.
    let (session_auth, user) = auth::sign_in_local(notifier.clone(), email, password)
        .await
        .map_err(|e| PortalError::Auth(e.to_string()))?;

    let session =
        chat::build_session(&config.gemini).map_err(|e| PortalError::Ai(e.to_string()))?;
    let mut presenter = ChatPresenter::new(session, notifier, &config.chat);

    if let Some(message) = once {
        let entry = presenter
            .submit(&message)
            .await
            .ok_or_else(|| PortalError::Other("message is empty".into()))?;
        println!("{}", entry.text);
        return Ok(());
    }

    println!("Welcome back, {}!", display_first_name(&user));
    for entry in presenter.entries() {
        print_entry(entry);
    }
    println!("\nSuggested questions:");
    for (i, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
        println!("  {}. {question}", i + 1);
    }
    println!("Commands: /ask <n>, /history, /clear, /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "/quit" | "/exit" => break,
            "/clear" => {
                presenter.clear();
                println!("Conversation cleared.");
            }
            "/history" => {
                for entry in presenter.entries() {
                    print_entry(entry);
                }
            }
            _ if line.starts_with("/ask") => {
                let index = line["/ask".len()..]
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1));
                match index {
                    Some(i) => match presenter.ask_suggested(i).await {
                        Some(entry) => {
                            println!("you: {}", SUGGESTED_QUESTIONS[i]);
                            print_entry(&entry);
                        }
                        None => println!("No suggestion {}.", i + 1),
                    },
                    None => println!("Usage: /ask <1-{}>", SUGGESTED_QUESTIONS.len()),
                }
            }
            _ => {
                if let Some(entry) = presenter.submit(line).await {
                    print_entry(&entry);
                }
            }
        }
    }

    session_auth.logout().await;
    Ok(())
}

fn run_locations(center: Option<&str>, notifier: &dyn NotificationSink) -> portal_common::Result<()> {
    if let Some(name) = center {
        let view = locations::center_on(name, notifier)
            .ok_or_else(|| PortalError::Other(format!("unknown location: {name}")))?;
        println!(
            "{} ({:.4}, {:.4}) zoom {}",
            view.label, view.center.lat, view.center.lng, view.zoom
        );
        return Ok(());
    }

    for location in &LOCATIONS {
        println!(
            "{} ({:.4}, {:.4})",
            location.title(),
            location.coords.lat,
            location.coords.lng
        );
        println!("  {}", location.description);
        for service in location.services {
            println!("  - {service}");
        }
    }
    Ok(())
}
