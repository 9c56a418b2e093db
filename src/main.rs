use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skucal::{app, calendar, config::AppConfig};

#[derive(Parser)]
#[command(name = "skucal")]
#[command(about = "Week-bucketed team feature planning calendar")]
struct Cli {
    /// Auth service project URL (overrides SUPABASE_URL)
    #[arg(long)]
    supabase_url: Option<String>,

    /// Auth service anon key (overrides SUPABASE_ANON_KEY)
    #[arg(long)]
    supabase_anon_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive planner
    Plan,
    /// Print the week table for a month and exit
    Weeks {
        /// Month to enumerate, as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Initialize tracing to stderr; the prompts own stdout.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "skucal=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Weeks { month }) => {
            let reference = match month {
                Some(raw) => parse_month(&raw)?,
                None => chrono::Local::now().date_naive(),
            };
            let weeks = calendar::weeks_in_month(reference);
            print!("{}", app::render::weeks_table(reference, &weeks));
        }
        Some(Commands::Plan) | None => {
            let config =
                AppConfig::from_env().with_overrides(cli.supabase_url, cli.supabase_anon_key);
            let backend_kind = config.backend();
            let demo = backend_kind.is_demo();

            let mut planner = app::Planner::new(backend_kind.build(), demo);
            planner.run().await?;
        }
    }

    Ok(())
}

fn parse_month(raw: &str) -> anyhow::Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("invalid month '{raw}', expected YYYY-MM"))
}
