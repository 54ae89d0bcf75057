//! Console storefront for the auction marketplace API.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use auction_core::{place_bid, AuthSession, BidError, Favorites, StateError, Storage};
use auction_types::{CreateLotPayload, Lot, RegisterPayload, UpdateLotPayload};
use auction_client::{BaseUrl, ClientConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API base URL (overrides AUCTION_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Creates an account
    Register {
        name: String,
        email: String,
        password: String,
        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Logs in and stores the token pair
    Login { username: String, password: String },
    /// Clears stored credentials and the cached profile
    Logout,
    /// Shows the current profile
    Me,
    /// Tops up the account balance
    TopUp { amount: f64 },
    /// Browses and manages lots
    Lots {
        #[command(subcommand)]
        command: LotsCommand,
    },
    /// Places a bid against a lot
    Bid { lot_id: i64, value: f64 },
    /// Manages favorite lots
    Fav {
        #[command(subcommand)]
        command: FavCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LotsCommand {
    /// Lists lots, optionally filtered by a search query
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Shows a single lot with its bets
    Show { id: i64 },
    /// Creates a lot
    Create {
        name: String,
        starting_price: f64,
        /// Auction close time (RFC 3339, e.g. 2026-09-01T12:00:00Z)
        end_time: DateTime<Utc>,
        /// Image URL; repeat for several images
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Updates fields of an owned lot
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        starting_price: Option<f64>,
        #[arg(long)]
        end_time: Option<DateTime<Utc>>,
    },
    /// Closes the auction early
    Finish { id: i64 },
    /// Deletes an owned lot
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum FavCommand {
    /// Lists favorite lot IDs
    List,
    Add { lot_id: i64 },
    Remove { lot_id: i64 },
    /// Adds when absent, removes when present
    Toggle { lot_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.base_url = BaseUrl::Static(url.clone());
    }
    let storage = Storage::from_env().map_err(anyhow::Error::new)?;
    let mut session = AuthSession::new(config, storage.clone()).map_err(anyhow::Error::new)?;
    session.initialize();

    match cli.command {
        Commands::Register { name, email, password, phone } => {
            let mut payload = RegisterPayload::new(name, email, password);
            payload.phone_number = phone;
            let created = session.register(&payload).await.map_err(api_message)?;
            println!("registered account #{} ({})", created.id, created.email);
            if let Some(message) = created.message {
                println!("{message}");
            }
        },
        Commands::Login { username, password } => {
            session.login(&username, &password).await.map_err(api_message)?;
            let user = session.user().context("profile missing after login")?;
            println!("logged in as {} (balance {:.2})", user.username, user.balance);
        },
        Commands::Logout => {
            session.logout();
            println!("logged out");
        },
        Commands::Me => {
            session.refresh_user().await;
            match session.user() {
                Some(user) => {
                    println!("#{} {} <{}>", user.id, user.username, user.email);
                    println!("balance: {:.2}", user.balance);
                    if let Some(role) = &user.role {
                        println!("role: {}", role.code);
                    }
                },
                None => println!("not logged in"),
            }
        },
        Commands::TopUp { amount } => {
            let balance = session.top_up(amount).await.map_err(api_message)?;
            println!("balance: {balance:.2}");
        },
        Commands::Lots { command } => run_lots(&session, command).await?,
        Commands::Bid { lot_id, value } => {
            let client = session.client();
            let mut lot = client.get_lot(lot_id).await.map_err(|e| anyhow::anyhow!(e.message()))?;
            match place_bid(client, &mut lot, value).await {
                Ok(bet) => println!("bid #{} accepted, lot price is now {:.2}", bet.id, bet.value),
                Err(BidError::BelowMinimum { minimum }) => {
                    anyhow::bail!("minimum bid for this lot is {minimum:.2}")
                },
                Err(BidError::Api(api)) => anyhow::bail!(api.message()),
            }
        },
        Commands::Fav { command } => {
            let mut favorites = Favorites::new(session.client().clone(), storage);
            if session.is_authenticated() {
                favorites.set_authenticated(true).await.map_err(api_message)?;
            }
            run_fav(&mut favorites, command).await?;
        },
    }

    Ok(())
}

async fn run_lots(session: &AuthSession, command: LotsCommand) -> Result<()> {
    let client = session.client();
    match command {
        LotsCommand::List { search } => {
            let lots = client
                .list_lots(search.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!(e.message()))?;
            if lots.is_empty() {
                println!("no lots found");
            }
            for lot in &lots {
                print_lot_row(lot);
            }
        },
        LotsCommand::Show { id } => {
            let lot = client.get_lot(id).await.map_err(|e| anyhow::anyhow!(e.message()))?;
            print_lot_row(&lot);
            for url in &lot.images_urls {
                println!("  image: {url}");
            }
            if let Some(bets) = &lot.bets {
                for bet in bets {
                    println!("  bet #{}: {:.2} by user {}", bet.id, bet.value, bet.user_id);
                }
            }
        },
        LotsCommand::Create { name, starting_price, end_time, images } => {
            let payload =
                CreateLotPayload { name, starting_price, end_time, images_urls: images };
            let lot = client.create_lot(&payload).await.map_err(|e| anyhow::anyhow!(e.message()))?;
            println!("created lot #{}", lot.id);
        },
        LotsCommand::Update { id, name, starting_price, end_time } => {
            let payload =
                UpdateLotPayload { name, starting_price, end_time, images_urls: None };
            let lot =
                client.update_lot(id, &payload).await.map_err(|e| anyhow::anyhow!(e.message()))?;
            println!("updated lot #{}", lot.id);
        },
        LotsCommand::Finish { id } => {
            let lot = client.finish_lot(id).await.map_err(|e| anyhow::anyhow!(e.message()))?;
            println!("finished lot #{} at {:.2}", lot.id, lot.minimum_bid());
        },
        LotsCommand::Delete { id } => {
            client.delete_lot(id).await.map_err(|e| anyhow::anyhow!(e.message()))?;
            println!("deleted lot #{id}");
        },
    }
    Ok(())
}

async fn run_fav(favorites: &mut Favorites, command: FavCommand) -> Result<()> {
    match command {
        FavCommand::List => {
            let ids = favorites.ids();
            if ids.is_empty() {
                println!("no favorites");
            }
            for id in ids {
                println!("{id}");
            }
        },
        FavCommand::Add { lot_id } => {
            favorites.add(lot_id).await.map_err(api_message)?;
            println!("added lot {lot_id} to favorites");
        },
        FavCommand::Remove { lot_id } => {
            favorites.remove(lot_id).await.map_err(api_message)?;
            println!("removed lot {lot_id} from favorites");
        },
        FavCommand::Toggle { lot_id } => {
            let now_favorite = favorites.toggle(lot_id).await.map_err(api_message)?;
            if now_favorite {
                println!("added lot {lot_id} to favorites");
            } else {
                println!("removed lot {lot_id} from favorites");
            }
        },
    }
    Ok(())
}

fn print_lot_row(lot: &Lot) {
    println!(
        "#{} {} at {:.2} (ends {})",
        lot.id,
        lot.name,
        lot.minimum_bid(),
        lot.end_time.format("%Y-%m-%d %H:%M")
    );
}

/// Turn API failures into their human-readable backend message.
fn api_message(err: StateError) -> anyhow::Error {
    match err {
        StateError::Api(api) => anyhow::anyhow!(api.message()),
        other => anyhow::Error::new(other),
    }
}
