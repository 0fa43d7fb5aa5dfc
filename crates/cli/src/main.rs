use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use watchcharts_core::watches::{FetchOptions, Logged, WatchChartsProvider, WatchDataProvider};

mod render;

#[derive(Debug, Parser)]
#[command(name = "watchcharts_cli")]
struct Args {
    /// Brand name (e.g. rolex, patek_philippe). Omit for the market index.
    #[arg(long)]
    brand: Option<String>,

    /// Cache-busting timestamp, RFC 3339 or YYYY-MM-DD. Defaults to now.
    #[arg(long)]
    as_of: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print the known brand names and codes, then exit.
    #[arg(long)]
    list_brands: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = watchcharts_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if args.list_brands {
        for (name, code) in watchcharts_core::brands::catalog() {
            println!("{name}\t{code}");
        }
        return Ok(());
    }

    let as_of = watchcharts_core::time::resolve_as_of(args.as_of.as_deref(), chrono::Utc::now())?;
    let provider = Logged::new(WatchChartsProvider::from_settings(&settings)?);

    let table = match provider
        .fetch_by_name(args.brand.as_deref(), FetchOptions::as_of(as_of))
        .await
    {
        Ok(table) => table,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(brand = ?args.brand, %as_of, error = %err, "watch data fetch failed");
            return Err(err);
        }
    };

    tracing::info!(brand = ?args.brand, %as_of, rows = table.len(), "fetched watch data");

    match args.format {
        OutputFormat::Table => print!("{}", render::render_text(&table)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table)?),
    }

    Ok(())
}

fn init_sentry(settings: &watchcharts_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
