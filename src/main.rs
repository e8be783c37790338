use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Utc};
use kalendaryo::config::{self, AppConfig};
use kalendaryo::web::{self, AppState};
use kalendaryo::{calendar, text};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "Usage: kal [serve | show [YEAR [MONTH]]]";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        // ── kal show [YEAR [MONTH]] ───────────────────────────────────────────
        Some("show") => cmd_show(&args[2..]),
        // ── kal / kal serve ───────────────────────────────────────────────────
        Some("serve") | None => cmd_serve().await,
        Some("help" | "-h" | "--help") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(other) => Err(anyhow!("Unknown command {other:?}\n{USAGE}")),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

// ─── Show command ─────────────────────────────────────────────────────────────

fn cmd_show(args: &[String]) -> Result<()> {
    // Logging to stderr so it doesn't interfere with the printed grid
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg      = AppConfig::load()?;
    let settings = cfg.calendar()?;
    let now      = Utc::now();
    let today    = settings.today(now);

    let year  = args.first().map(|s| calendar::parse_year(s)).transpose()?.unwrap_or(today.year());
    let month = args.get(1).map(|s| calendar::parse_month(s)).transpose()?.unwrap_or(today.month());

    let grid = calendar::build(year, month, &settings.month_options(now))?;
    print!("{}", text::render_month(&grid));
    Ok(())
}

// ─── Server ───────────────────────────────────────────────────────────────────

async fn cmd_serve() -> Result<()> {
    let log_dir = config::data_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "kalendaryo.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    tracing::info!("Starting Kalendaryo");

    let cfg      = AppConfig::load()?;
    let settings = cfg.calendar().context("invalid [calendar] config")?;
    let plan = match &cfg.plan {
        Some(p) => {
            let plan = calendar::countdown_plan(p.target, &p.entries)?;
            tracing::info!("Loaded plan with {} entries ending {}", plan.len(), p.target);
            plan
        }
        None => Default::default(),
    };

    let state = AppState::new(settings, plan)?;
    web::serve(state, &cfg.server()).await
}
