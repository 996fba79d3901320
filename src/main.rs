use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod display;
mod engine;
mod error;
mod markup;
mod wiktionary;

pub use error::{Error, Result};

use config::Config;
use engine::Resolver;
use wiktionary::WiktionaryClient;

#[derive(Parser)]
#[command(name = "wikilook")]
#[command(about = "Looks up a word on Wiktionary and resolves its base forms")]
struct Args {
    /// Word to look up
    word: String,

    /// Language section to extract (defaults to Latin)
    #[arg(long)]
    language: Option<String>,

    /// Print rewritten HTML instead of plain text
    #[arg(long)]
    html: bool,

    /// Print the resolved groups as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let word = args.word.trim().to_lowercase();
    if word.is_empty() {
        eprintln!("nothing to look up");
        std::process::exit(2);
    }

    let mut config = Config::latin();
    if let Some(language) = args.language {
        config.language = language;
    }

    if let Err(error) = run(&word, config, args.html, args.json).await {
        match error {
            Error::WordNotFound(word) => {
                eprintln!("word not found: {word}");
                std::process::exit(1);
            }
            other => {
                eprintln!("lookup failed: {other}");
                std::process::exit(2);
            }
        }
    }
}

async fn run(word: &str, config: Config, html: bool, json: bool) -> Result<()> {
    let client = WiktionaryClient::new(&config)?;
    let resolver = Resolver::new(client, config);
    let groups = resolver.resolve(word).await?;

    if json {
        let outputs = display::group_outputs(&groups, resolver.config());
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else if html {
        for (index, group) in groups.iter().enumerate() {
            if index > 0 {
                println!("<hr>");
            }
            println!("{}", display::render_group_html(group, resolver.config()));
        }
    } else {
        for (index, group) in groups.iter().enumerate() {
            if index > 0 {
                println!("----------");
            }
            print!("{}", display::render_group_text(group, resolver.config()));
        }
    }

    Ok(())
}
