mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use articles::config::Config;
use articles::state::AppState;
use articles_core::article::{ArticleData, Principal};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "articles=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let state = AppState::from_config(&config).await?;

    let result = run(&state, cli.command, cli.pretty).await;

    // Detached cache writes must land before the process exits
    state.shutdown().await;
    result
}

async fn run(state: &AppState, command: Commands, pretty: bool) -> Result<()> {
    let articles = &state.articles;

    match command {
        Commands::List { author: Some(author) } => {
            print_json(&articles.find_by_author(&author).await?, pretty)
        }
        Commands::List { author: None } => print_json(&articles.find_all().await?, pretty),
        Commands::Get { id } => print_json(&articles.find_by_id(id).await?, pretty),
        Commands::Create {
            author_id,
            author_name,
            author_login,
            title,
            body,
        } => {
            let mut principal = Principal::new(author_id);
            if let Some(name) = author_name {
                principal = principal.with_name(name);
            }
            if let Some(login) = author_login {
                principal = principal.with_login(login);
            }
            let data = article_data(title, body);
            print_json(&articles.save(&principal, &data).await?, pretty)
        }
        Commands::Update {
            owner,
            id,
            title,
            body,
        } => {
            let data = article_data(title, body);
            print_json(&articles.update(&owner, id, &data).await?, pretty)
        }
        Commands::Delete { owner, id } => {
            print_json(&articles.destroy(&owner, id).await?, pretty)
        }
    }
}

fn article_data(title: String, body: Option<String>) -> ArticleData {
    let data = ArticleData::new(title);
    match body {
        Some(body) => data.with_body(body),
        None => data,
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
