use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::AppServices;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_SESSION_DB: &str = "sqlite::memory:";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --session-db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--session-db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url     (empty; enter it on the main page)");
    eprintln!("  --session-db  {DEFAULT_SESSION_DB}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SURVEY_API_URL, SURVEY_SESSION_DB, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    api_url: String,
    session_db: String,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut api_url = env("SURVEY_API_URL").unwrap_or_default();
        let mut session_db = env("SURVEY_SESSION_DB")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_SESSION_DB.to_string(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    api_url = require_value(args, "--api-url")?;
                }
                "--session-db" => {
                    let value = require_value(args, "--session-db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    session_db = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            api_url,
            session_db,
        }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim().to_string();
    if trimmed.starts_with("sqlite::memory:") || trimmed.starts_with("sqlite://") {
        return trimmed;
    }

    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url.starts_with("sqlite::memory:") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = log_fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Some(parsed) = parsed else {
        print_usage();
        return Ok(());
    };

    init_tracing();

    // Open + migrate the session store at startup; the UI only ever sees services.
    prepare_sqlite_file(&parsed.session_db)?;
    let services = AppServices::new_sqlite(&parsed.session_db, &parsed.api_url).await?;
    info!(session_db = %parsed.session_db, "session store ready");

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Survey")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Option<Args>, ArgsError> {
        let mut iter = args.iter().map(ToString::to_string);
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Args::parse(&mut iter, |key| {
            env.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn defaults_to_in_memory_session_and_empty_url() {
        let args = parse(&[], &[]).unwrap().unwrap();
        assert_eq!(args.api_url, "");
        assert_eq!(args.session_db, DEFAULT_SESSION_DB);
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--api-url", "http://cli.test"],
            &[("SURVEY_API_URL", "http://env.test")],
        )
        .unwrap()
        .unwrap();
        assert_eq!(args.api_url, "http://cli.test");
    }

    #[test]
    fn environment_fills_missing_flags() {
        let args = parse(
            &[],
            &[
                ("SURVEY_API_URL", "http://env.test"),
                ("SURVEY_SESSION_DB", "sqlite:///tmp/survey.db"),
            ],
        )
        .unwrap()
        .unwrap();
        assert_eq!(args.api_url, "http://env.test");
        assert_eq!(args.session_db, "sqlite:///tmp/survey.db");
    }

    #[test]
    fn relative_db_path_becomes_absolute_url() {
        let args = parse(&["--session-db", "sqlite:survey.db"], &[])
            .unwrap()
            .unwrap();
        assert!(args.session_db.starts_with("sqlite:///"));
        assert!(args.session_db.ends_with("survey.db"));
    }

    #[test]
    fn help_and_bad_input() {
        assert!(parse(&["--help"], &[]).unwrap().is_none());
        assert!(matches!(
            parse(&["--api-url"], &[]),
            Err(ArgsError::MissingValue { flag: "--api-url" })
        ));
        assert!(matches!(
            parse(&["--session-db", " "], &[]),
            Err(ArgsError::InvalidDbUrl { .. })
        ));
        assert!(matches!(
            parse(&["--verbose"], &[]),
            Err(ArgsError::UnknownArg(arg)) if arg == "--verbose"
        ));
    }
}
