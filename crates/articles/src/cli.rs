//! CLI command definitions.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Admin CLI for the article store.
#[derive(Debug, Parser)]
#[command(name = "articles")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List articles.
    List {
        /// Only list the articles of this author.
        #[arg(long)]
        author: Option<String>,
    },
    /// Get article by ID.
    Get {
        /// Article ID.
        id: Uuid,
    },
    /// Create a new article.
    Create {
        /// Author ID.
        #[arg(long, env = "ARTICLES_AUTHOR_ID")]
        author_id: String,
        /// Author display name.
        #[arg(long)]
        author_name: Option<String>,
        /// Author login.
        #[arg(long)]
        author_login: Option<String>,
        /// Article title.
        #[arg(long)]
        title: String,
        /// Article body.
        #[arg(long)]
        body: Option<String>,
    },
    /// Replace the content of an article.
    Update {
        /// ID of the author owning the article.
        owner: String,
        /// Article ID.
        id: Uuid,
        /// New title.
        #[arg(long)]
        title: String,
        /// New body; omitting it clears the body.
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete article by ID.
    Delete {
        /// ID of the author owning the article.
        owner: String,
        /// Article ID.
        id: Uuid,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_by_author() {
        let cli = Cli::try_parse_from(["articles", "list", "--author", "u1"]).unwrap();

        assert!(matches!(
            cli.command,
            Commands::List { author: Some(ref a) } if a == "u1"
        ));
    }

    #[test]
    fn test_parse_update() {
        let id = Uuid::nil();
        let cli = Cli::try_parse_from([
            "articles",
            "--pretty",
            "update",
            "u1",
            &id.to_string(),
            "--title",
            "Hi",
        ])
        .unwrap();

        assert!(cli.pretty);
        match cli.command {
            Commands::Update {
                owner,
                id: parsed,
                title,
                body,
            } => {
                assert_eq!(owner, "u1");
                assert_eq!(parsed, id);
                assert_eq!(title, "Hi");
                assert_eq!(body, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_get_rejects_invalid_id() {
        assert!(Cli::try_parse_from(["articles", "get", "not-a-uuid"]).is_err());
    }
}
