use crate::context::Context;
use crate::context::GlobalArgs;
use crate::parse;
use campus_store::Query;
use campus_store::RecordStoreExt;
use campus_store::records::LostFoundItem;
use campus_store::records::MarketplaceListing;
use campus_store::records::TravelShare;
use campus_store::records::new_id;
use chrono::NaiveDate;
use chrono::NaiveTime;
use clap::Parser;

const LISTING_CATEGORIES: [&str; 5] = ["books", "electronics", "furniture", "cycles", "other"];
const LOST_FOUND_STATUSES: [&str; 2] = ["lost", "found"];

/// Student exchange: buy and sell, lost and found, shared rides.
#[derive(Debug, Parser)]
pub struct ExchangeCli {
    #[command(subcommand)]
    pub cmd: ExchangeCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum ExchangeCommand {
    #[command(subcommand)]
    Market(MarketCommand),
    #[command(subcommand)]
    Lost(LostCommand),
    #[command(subcommand)]
    Travel(TravelCommand),
}

#[derive(Debug, clap::Subcommand)]
pub enum MarketCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = LISTING_CATEGORIES, default_value = "other")]
        category: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
    /// Available listings, newest first.
    List {
        #[arg(long, value_parser = LISTING_CATEGORIES)]
        category: Option<String>,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum LostCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = LOST_FOUND_STATUSES, default_value = "lost")]
        status: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
    /// Unresolved reports, newest first.
    List {
        #[arg(long, value_parser = LOST_FOUND_STATUSES)]
        status: Option<String>,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum TravelCommand {
    Add {
        #[arg(long)]
        destination: String,
        #[arg(long, value_parser = parse::date)]
        date: NaiveDate,
        #[arg(long, value_parser = parse::time)]
        time: NaiveTime,
        #[arg(long)]
        seats: u32,
        #[arg(long)]
        cost: Option<f64>,
        #[arg(long)]
        pickup: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Trips leaving today or later, soonest first.
    List,
}

pub fn run(cli: ExchangeCli, global: &GlobalArgs) -> anyhow::Result<()> {
    let ctx = Context::open(global)?;
    match cli.cmd {
        ExchangeCommand::Market(cmd) => run_market(cmd, &ctx),
        ExchangeCommand::Lost(cmd) => run_lost(cmd, &ctx),
        ExchangeCommand::Travel(cmd) => run_travel(cmd, &ctx),
    }
}

fn run_market(cmd: MarketCommand, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        MarketCommand::Add {
            title,
            description,
            category,
            price,
            condition,
            contact,
        } => {
            if !price.is_finite() || price < 0.0 {
                anyhow::bail!("price must be a non-negative number");
            }
            let listing = MarketplaceListing {
                id: new_id(),
                title,
                description,
                category,
                price,
                condition,
                status: "available".to_string(),
                contact_info: contact,
                created_by: ctx.user_id(),
                created_at: ctx.now,
            };
            ctx.store.insert(&listing)?;
            tracing::info!(id = %listing.id, "saved listing");
            println!("{}", listing.id);
        }
        MarketCommand::List { category } => {
            let mut query = Query::new().eq("status", "available");
            if let Some(category) = category {
                query = query.eq("category", category);
            }
            let query = query.order_by_desc("created_at");
            for listing in ctx.store.fetch::<MarketplaceListing>(&query)? {
                println!(
                    "{} [{}] Rs {:.0}{}",
                    listing.title,
                    listing.category,
                    listing.price,
                    listing
                        .condition
                        .as_deref()
                        .map(|c| format!(", {c}"))
                        .unwrap_or_default()
                );
                if let Some(contact) = &listing.contact_info {
                    println!("    contact: {contact}");
                }
            }
        }
    }
    Ok(())
}

fn run_lost(cmd: LostCommand, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        LostCommand::Add {
            title,
            description,
            status,
            location,
            contact,
        } => {
            let item = LostFoundItem {
                id: new_id(),
                title,
                description,
                status,
                location,
                contact_info: contact,
                resolved: false,
                created_by: ctx.user_id(),
                created_at: ctx.now,
            };
            ctx.store.insert(&item)?;
            tracing::info!(id = %item.id, status = %item.status, "saved lost & found report");
            println!("{}", item.id);
        }
        LostCommand::List { status } => {
            let mut query = Query::new().eq("resolved", false);
            if let Some(status) = status {
                query = query.eq("status", status);
            }
            let query = query.order_by_desc("created_at");
            for item in ctx.store.fetch::<LostFoundItem>(&query)? {
                println!(
                    "[{}] {} @ {}",
                    item.status,
                    item.title,
                    item.location.as_deref().unwrap_or("unknown")
                );
            }
        }
    }
    Ok(())
}

fn run_travel(cmd: TravelCommand, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        TravelCommand::Add {
            destination,
            date,
            time,
            seats,
            cost,
            pickup,
            notes,
        } => {
            if seats == 0 {
                anyhow::bail!("a trip needs at least one free seat");
            }
            let trip = TravelShare {
                id: new_id(),
                destination,
                departure_date: date,
                departure_time: time,
                seats_available: seats,
                cost_per_person: cost,
                pickup_location: pickup,
                notes,
                passengers: Vec::new(),
                created_by: ctx.user_id(),
                created_at: ctx.now,
            };
            ctx.store.insert(&trip)?;
            tracing::info!(id = %trip.id, destination = %trip.destination, "saved trip");
            println!("{}", trip.id);
        }
        TravelCommand::List => {
            let query = Query::new()
                .gte("departure_date", ctx.today().to_string())
                .order_by("departure_date");
            for trip in ctx.store.fetch::<TravelShare>(&query)? {
                println!(
                    "{} on {} at {} from {}, {} seats{}",
                    trip.destination,
                    trip.departure_date,
                    trip.departure_time.format("%H:%M"),
                    trip.pickup_location,
                    trip.seats_available,
                    trip.cost_per_person
                        .map(|c| format!(", Rs {c:.0} each"))
                        .unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}
