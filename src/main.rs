// sitekit command line entry point.
// Builds a page of repository cards from the arguments and prints their stats summaries.

use std::process::ExitCode;

use clap::Parser;
use sitekit::dom::Document;
use sitekit::{Site, SiteConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sitekit", version, about = "Print GitHub stats summaries for repository cards")]
struct Cli {
    /// Repositories as owner/name
    #[arg(required = true)]
    repos: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let repos = cli.repos;

    let config = SiteConfig::from_env();
    let site = match Site::from_config(&config) {
        Ok(site) => site,
        Err(e) => {
            eprintln!("sitekit: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut doc = Document::new();
    let content = doc.element(doc.body(), "main", &[]);
    let mut cards = Vec::with_capacity(repos.len());
    for repo in &repos {
        let card = doc.element(content, "article", &["card"]);
        doc.set_attribute(card, "data-repo", repo);
        cards.push(doc.element(card, "div", &["card-body"]));
    }

    let report = site.start(&mut doc).await;

    for (repo, card_body) in repos.iter().zip(cards) {
        match doc.query_class_within(card_body, "repo-stats") {
            Some(summary) => {
                let items: Vec<String> = doc
                    .children(summary)
                    .iter()
                    .map(|item| doc.text_content(*item))
                    .collect();
                println!("{}: {}", repo, items.join("  "));
            }
            None => println!("{}: stats unavailable", repo),
        }
    }

    for (unit, error) in &report.failed {
        eprintln!("unit {} failed: {}", unit, error);
    }

    ExitCode::SUCCESS
}
