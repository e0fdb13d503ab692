//! CLI administration tool for shortlink.
//!
//! Mints and inspects user tokens and manages a user's URLs directly in
//! storage, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Mint a token for a new random user (or a given one)
//! cargo run --bin admin -- token mint
//! cargo run --bin admin -- token mint --user 42
//!
//! # Show which user a cookie value belongs to
//! cargo run --bin admin -- token inspect 0000002a9f...
//!
//! # List and delete a user's URLs
//! cargo run --bin admin -- -d "$DATABASE_DSN" urls list 42
//! cargo run --bin admin -- -f urls.json urls delete 42 Ab3_x9Qz Q0f-Lm2a
//! ```
//!
//! # Environment Variables
//!
//! Storage is selected exactly as for the server: `DATABASE_DSN`, then
//! `FILE_STORAGE_PATH`, then memory. Token commands need `USER_TOKEN_SECRET`.
//!
//! The file backend assumes a single writer: do not delete through this tool
//! while a server is running on the same file.

use shortlink::application::services::LinkService;
use shortlink::application::services::UserTokenCodec;
use shortlink::config::StorageArgs;
use shortlink::domain::entities::UserId;
use shortlink::server::open_repository;
use shortlink::state::DynRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,

    /// Base URL used when printing short URLs.
    #[arg(
        short = 'b',
        long,
        env = "BASE_URL",
        default_value = "http://localhost:8080"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Mint and inspect user tokens
    Token {
        /// HMAC key the server signs cookies with
        #[arg(long, env = "USER_TOKEN_SECRET", hide_env_values = true)]
        secret: String,

        #[command(subcommand)]
        action: TokenAction,
    },

    /// Inspect and delete a user's URLs
    Urls {
        #[command(subcommand)]
        action: UrlsAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Mint a token, for a random new user unless one is given
    Mint {
        #[arg(short, long)]
        user: Option<UserId>,
    },

    /// Verify a token and print the user it carries
    Inspect { token: String },
}

/// URL management subcommands.
#[derive(Subcommand)]
enum UrlsAction {
    /// List every URL a user created
    List { user: UserId },

    /// Soft-delete some of a user's URLs
    Delete {
        user: UserId,

        /// Short codes to delete
        #[arg(required = true)]
        shorts: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { secret, action } => {
            anyhow::ensure!(!secret.is_empty(), "USER_TOKEN_SECRET must not be empty");
            handle_token_action(action, &UserTokenCodec::new(secret))
        }
        Commands::Urls { action } => {
            cli.storage.validate()?;
            let repository = open_repository(&cli.storage)
                .await
                .context("Failed to open storage")?;
            let links = LinkService::new(repository, cli.base_url);
            handle_urls_action(action, &links).await
        }
    }
}

/// Dispatches token commands.
fn handle_token_action(action: TokenAction, codec: &UserTokenCodec) -> Result<()> {
    match action {
        TokenAction::Mint { user } => {
            let (user_id, token) = match user {
                Some(user_id) => (user_id, codec.mint_for(user_id)),
                None => codec.mint(),
            };

            println!("{}", "🔑 User token".bright_blue().bold());
            println!();
            println!("  User:  {}", user_id.to_string().cyan());
            println!("  Token: {}", token.bright_yellow().bold());
            println!();
            println!("{}", "Send it as a cookie:".bright_white());
            println!("  curl -b \"user_token={}\" http://localhost:8080/api/user/urls", token);
            println!();
        }
        TokenAction::Inspect { token } => match codec.verify(token.trim()) {
            Some(user_id) => {
                println!(
                    "{} token belongs to user {}",
                    "✅".green(),
                    user_id.to_string().cyan().bold()
                );
            }
            None => {
                println!(
                    "{}",
                    "❌ Invalid token (malformed, or signed with another secret)".red()
                );
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Dispatches URL commands.
async fn handle_urls_action(action: UrlsAction, links: &LinkService<DynRepository>) -> Result<()> {
    match action {
        UrlsAction::List { user } => list_urls(links, user).await,
        UrlsAction::Delete { user, shorts, yes } => delete_urls(links, user, shorts, yes).await,
    }
}

/// Lists a user's URLs, deleted ones included.
///
/// # Output Format
///
/// ```text
/// 📋 URLs of user 42
///
///   Short URL                          Original URL                        Status
///   ──────────────────────────────────────────────────────────────────────────────
///   http://localhost:8080/Ab3_x9Qz     https://example.com/                ACTIVE
///   http://localhost:8080/Q0f-Lm2a     https://example.org/page            DELETED
/// ```
async fn list_urls(links: &LinkService<DynRepository>, user: UserId) -> Result<()> {
    println!(
        "{}",
        format!("📋 URLs of user {}", user).bright_blue().bold()
    );
    println!();

    let repository = links.repository();
    let shorts = repository
        .list_by_owner(user)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

    if shorts.is_empty() {
        println!("{}", "  No URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<34} {:<35} {:<8}",
        "Short URL".bright_white().bold(),
        "Original URL".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for short in &shorts {
        let Some(stored) = repository
            .get(short)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", short, e))?
        else {
            continue;
        };

        let status = if stored.is_deleted() {
            "DELETED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<34} {:<35} {}",
            links.short_url(short).cyan(),
            stored.long_url,
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        shorts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Soft-deletes a user's URLs after confirmation.
///
/// Applied synchronously, unlike `DELETE /api/user/urls`. Codes the user
/// does not own are left untouched.
async fn delete_urls(
    links: &LinkService<DynRepository>,
    user: UserId,
    shorts: Vec<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete URLs".bright_blue().bold());
    println!();
    println!("  User:  {}", user.to_string().cyan());
    for short in &shorts {
        println!("  Code:  {}", short.bright_yellow());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} URL(s)?", shorts.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    links
        .repository()
        .mark_deleted(user, &shorts)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete URLs: {}", e))?;

    println!("{}", "✅ Done".green().bold());
    println!();

    Ok(())
}
