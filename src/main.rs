use std::time::Instant;

use clap::{Parser, Subcommand};
use play_scraper::config::Settings;
use play_scraper::{HttpFetcher, LanguageCode, PlayStore};

#[derive(Parser)]
#[command(name = "play_scraper", about = "App metadata from the Play Store web pages")]
struct Cli {
    /// Store endpoint (overrides PLAY_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full record for one app id
    Lookup {
        app_id: String,
        /// Extra description languages (English is always fetched)
        #[arg(short, long = "lang")]
        langs: Vec<LanguageCode>,
    },
    /// Keyword search
    Search {
        term: String,
        /// Max results to print
        #[arg(short = 'n', long, default_value = "20", allow_negative_numbers = true)]
        limit: i64,
        #[arg(short, long, default_value = "en")]
        lang: LanguageCode,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    }
    let store = PlayStore::new(HttpFetcher::new(&settings)?, &settings.endpoint)?;

    match cli.command {
        Commands::Lookup { app_id, langs } => {
            let out = store.lookup_languages(&app_id, &langs).await?;
            for m in &out.missing {
                eprintln!("No {} description: {}", m.lang, m.reason);
            }
            println!("{}", serde_json::to_string_pretty(&out.app)?);
        }
        Commands::Search { term, limit, lang } => {
            let mut results = store.search(&term, limit, &lang).await?;
            // pages come in blocks of 20
            results.truncate(limit as usize);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    tracing::debug!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
