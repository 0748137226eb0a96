// SPDX-License-Identifier: MPL-2.0
use moodboard::app::paths;
use moodboard::app::persistence::{self, PersistenceBridge};
use moodboard::app::MoodboardState;
use moodboard::application::query::board_summary;
use moodboard::config;
use moodboard::error::Error;
use moodboard::i18n::I18n;
use moodboard::infrastructure::FileStore;
use moodboard::notifications::{Manager, Notification};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MOODBOARD_LOG";

type Sender = mpsc::UnboundedSender<Notification>;

enum Command {
    Summary,
    Check,
    Reset,
    Export(PathBuf),
    Import(PathBuf),
}

struct Flags {
    lang: Option<String>,
    data_dir: Option<String>,
    config_dir: Option<String>,
    help: bool,
    command: Option<String>,
    file: Option<PathBuf>,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        help: args.contains(["-h", "--help"]),
        lang: args.opt_value_from_str("--lang")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        command: args.subcommand()?,
        file: args.opt_free_from_str()?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {rest:?}"),
        });
    }
    Ok(flags)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", I18n::default().tr("cli-usage"));
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir, flags.config_dir);
    let (config, config_warning) = config::load();
    let i18n = I18n::new(flags.lang, &config);
    if let Some(key) = config_warning {
        eprintln!("{}", i18n.tr(&key));
    }

    if flags.help {
        println!("{}", i18n.tr("cli-usage"));
        return ExitCode::SUCCESS;
    }

    let command = match (flags.command.as_deref(), flags.file) {
        (None | Some("summary"), _) => Command::Summary,
        (Some("check"), _) => Command::Check,
        (Some("reset"), _) => Command::Reset,
        (Some("export"), Some(file)) => Command::Export(file),
        (Some("import"), Some(file)) => Command::Import(file),
        (Some(name @ ("export" | "import")), None) => {
            eprintln!("{}", tr_arg(&i18n, "cli-missing-file", "command", name));
            return ExitCode::from(2);
        }
        (Some(other), _) => {
            eprintln!("{}", tr_arg(&i18n, "cli-unknown-command", "command", other));
            eprintln!("{}", i18n.tr("cli-usage"));
            return ExitCode::from(2);
        }
    };

    let (sender, mut receiver) = mpsc::unbounded_channel();
    let result = run(command, &sender);
    if let Err(err) = &result {
        tracing::error!(error = %err, "command failed");
        report(&sender, Notification::from_error(err));
    }

    let mut manager = Manager::new();
    manager.drain(&mut receiver);
    print_notifications(&mut manager, &i18n);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn tr_arg(i18n: &I18n, key: &str, name: &str, value: impl ToString) -> String {
    i18n.tr_with_args(key, &[(name.to_string(), value.to_string())])
}

/// Warnings and errors go to stderr, everything else to stdout.
fn print_notifications(manager: &mut Manager, i18n: &I18n) {
    loop {
        let batch = manager.flush();
        if batch.is_empty() {
            break;
        }
        for notification in &batch {
            let text = i18n.notification(notification);
            if notification.severity().is_problem() {
                eprintln!("{text}");
            } else {
                println!("{text}");
            }
        }
    }
}

fn report(sender: &Sender, notification: Notification) {
    // The receiver lives in `main` until every command has returned.
    let _ = sender.send(notification);
}

fn report_repairs(sender: &Sender, repairs: &[String]) {
    for repair in repairs {
        report(
            sender,
            Notification::warning("cli-repair").with_arg("repair", repair.as_str()),
        );
    }
}

fn run(command: Command, sender: &Sender) -> Result<(), Error> {
    let bridge = PersistenceBridge::new(FileStore::open_default()?);

    match command {
        Command::Summary => {
            let state = match bridge.load_board()? {
                Some(restored) => {
                    report_repairs(sender, &restored.repairs);
                    restored.state
                }
                None => {
                    report(sender, Notification::info("cli-no-board"));
                    MoodboardState::default()
                }
            };
            println!("{}", board_summary(&state));
        }
        Command::Check => match bridge.load_board()? {
            Some(restored) if !restored.repairs.is_empty() => {
                report(
                    sender,
                    Notification::warning("cli-check-repaired")
                        .with_arg("count", restored.repairs.len().to_string()),
                );
                report_repairs(sender, &restored.repairs);
            }
            Some(_) => report(sender, Notification::success("cli-check-ok")),
            None => report(sender, Notification::info("cli-no-board")),
        },
        Command::Reset => {
            bridge.save_board(&MoodboardState::default())?;
            report(sender, Notification::success("cli-reset-done"));
        }
        Command::Export(path) => {
            let (state, notification) = bridge.restore_or_default();
            if let Some(notification) = notification {
                report(sender, notification);
            }
            persistence::export_board(&state, &path)?;
            report(
                sender,
                Notification::success("cli-exported").with_arg("path", path.display().to_string()),
            );
        }
        Command::Import(path) => {
            let restored = persistence::import_board(&path)?;
            report_repairs(sender, &restored.repairs);
            bridge.save_board(&restored.state)?;
            report(
                sender,
                Notification::success("cli-imported").with_arg("path", path.display().to_string()),
            );
        }
    }
    Ok(())
}
