use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing::info;

use backend::HostedConfig;
use backend::hosted::{ENV_API_KEY, ENV_BACKEND_URL};
use services::AppServices;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingBackendUrl,
    MissingApiKey,
    InvalidBackendUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingBackendUrl => {
                write!(f, "no backend url: pass --backend-url or set {ENV_BACKEND_URL}")
            }
            ArgsError::MissingApiKey => {
                write!(f, "no api key: pass --api-key or set {ENV_API_KEY}")
            }
            ArgsError::InvalidBackendUrl { raw } => write!(f, "invalid backend url: {raw}"),
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
    eprintln!("  cargo run -p app -- [--backend-url <url>] [--api-key <key>]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {ENV_BACKEND_URL}, {ENV_API_KEY}");
}

struct Args {
    config: HostedConfig,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut backend_url = std::env::var(ENV_BACKEND_URL).ok();
        let mut api_key = std::env::var(ENV_API_KEY).ok();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend-url" => {
                    backend_url = Some(require_value(args, "--backend-url")?);
                }
                "--api-key" => {
                    api_key = Some(require_value(args, "--api-key")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let backend_url = backend_url.ok_or(ArgsError::MissingBackendUrl)?;
        let api_key = api_key.ok_or(ArgsError::MissingApiKey)?;
        let config = HostedConfig::new(&backend_url, api_key)
            .map_err(|_| ArgsError::InvalidBackendUrl { raw: backend_url })?;

        Ok(Self { config })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    info!(endpoint = %parsed.config.base_url, "starting portal");
    let services = AppServices::hosted(parsed.config);
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // Explicitly disable always-on-top so the app doesn't behave like a
    // modal window in dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Gyan Setu")
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
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
