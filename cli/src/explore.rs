use crate::context::Context;
use crate::context::GlobalArgs;
use campus_insights::places;
use campus_store::Query;
use campus_store::RecordStoreExt;
use campus_store::records::NearbyPlace;
use campus_store::records::new_id;
use clap::Parser;

const PLACE_CATEGORIES: [&str; 4] = ["restaurant", "cafe", "attraction", "shop"];

/// Places around campus.
#[derive(Debug, Parser)]
pub struct ExploreCli {
    #[command(subcommand)]
    pub cmd: ExploreCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum ExploreCommand {
    #[command(subcommand)]
    Place(PlaceCommand),
    /// Most popular places, weighing rating by number of reviews.
    Recommend {
        #[arg(long, default_value_t = 3)]
        k: usize,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum PlaceCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = PLACE_CATEGORIES)]
        category: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Comma separated, e.g. `wifi,budget`.
        #[arg(long = "vibe", value_delimiter = ',')]
        vibe_tags: Vec<String>,
        #[arg(long, default_value_t = 0.0)]
        rating: f64,
        #[arg(long, default_value_t = 0)]
        reviews: u64,
    },
    /// Highest rated first.
    List {
        #[arg(long, value_parser = PLACE_CATEGORIES)]
        category: Option<String>,
    },
}

pub fn run(cli: ExploreCli, global: &GlobalArgs) -> anyhow::Result<()> {
    let ctx = Context::open(global)?;
    match cli.cmd {
        ExploreCommand::Place(PlaceCommand::Add {
            name,
            category,
            description,
            address,
            vibe_tags,
            rating,
            reviews,
        }) => {
            if !(0.0..=5.0).contains(&rating) {
                anyhow::bail!("rating must be between 0 and 5, got {rating}");
            }
            let mut tags: Vec<String> = Vec::new();
            for tag in vibe_tags.into_iter().map(|t| t.trim().to_string()) {
                if !tag.is_empty() && !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
            let place = NearbyPlace {
                id: new_id(),
                name,
                category,
                description,
                address,
                vibe_tags: tags,
                rating,
                review_count: reviews,
                created_by: ctx.user_id(),
                created_at: ctx.now,
            };
            ctx.store.insert(&place)?;
            tracing::info!(id = %place.id, name = %place.name, "saved place");
            println!("{}", place.id);
        }
        ExploreCommand::Place(PlaceCommand::List { category }) => {
            let mut query = Query::new();
            if let Some(category) = category {
                query = query.eq("category", category);
            }
            for place in ctx.store.fetch::<NearbyPlace>(&query.order_by_desc("rating"))? {
                print_place(&place);
            }
        }
        ExploreCommand::Recommend { k } => {
            let all = ctx
                .store
                .fetch::<NearbyPlace>(&Query::new().order_by_desc("rating"))?;
            for place in places::recommend(&all, k) {
                print_place(place);
            }
        }
    }
    Ok(())
}

fn print_place(place: &NearbyPlace) {
    println!(
        "{} [{}] {:.1} ({} reviews)",
        place.name, place.category, place.rating, place.review_count
    );
    if !place.vibe_tags.is_empty() {
        println!("    {}", place.vibe_tags.join(", "));
    }
}
