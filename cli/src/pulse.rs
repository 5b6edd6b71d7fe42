use crate::context::Context;
use crate::context::GlobalArgs;
use crate::parse;
use crate::print_json;
use campus_insights::mail;
use campus_store::Query;
use campus_store::RecordStoreExt;
use campus_store::records::MailSummary;
use campus_store::records::MessMenu;
use campus_store::records::new_id;
use chrono::NaiveDate;
use clap::Parser;

/// Daily pulse: mail digests and the mess menu.
#[derive(Debug, Parser)]
pub struct PulseCli {
    #[command(subcommand)]
    pub cmd: PulseCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum PulseCommand {
    /// Classify and summarize mail.
    #[command(subcommand)]
    Mail(MailCommand),
    /// Mess menu for a day.
    #[command(subcommand)]
    Menu(MenuCommand),
}

#[derive(Debug, clap::Subcommand)]
pub enum MailCommand {
    /// Print the classification of a mail without saving it.
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Classify a mail and save the digest.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Most recent digests first.
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum MenuCommand {
    Add {
        /// Breakfast, Lunch, Snacks or Dinner.
        #[arg(long = "meal")]
        meal_type: String,
        /// Comma separated dishes.
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<String>,
        /// Defaults to today.
        #[arg(long, value_parser = parse::date)]
        date: Option<NaiveDate>,
    },
    Show {
        /// Defaults to today.
        #[arg(long, value_parser = parse::date)]
        date: Option<NaiveDate>,
    },
}

pub fn run(cli: PulseCli, global: &GlobalArgs) -> anyhow::Result<()> {
    match cli.cmd {
        PulseCommand::Mail(MailCommand::Classify { title, body }) => {
            print_json(&mail::classify(&title, &body))?;
        }
        PulseCommand::Mail(cmd) => run_mail(cmd, &Context::open(global)?)?,
        PulseCommand::Menu(cmd) => run_menu(cmd, &Context::open(global)?)?,
    }
    Ok(())
}

fn run_mail(cmd: MailCommand, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        MailCommand::Add { title, body } => {
            let classification = mail::classify(&title, &body);
            let mut summary = MailSummary::new(title, body, classification, ctx.user_id());
            summary.created_at = ctx.now;
            ctx.store.insert(&summary)?;
            tracing::info!(id = %summary.id, category = %summary.category, "saved mail summary");
            print_json(&summary)?;
        }
        MailCommand::List { limit } => {
            let query = Query::new().order_by_desc("created_at").limit(limit);
            for summary in ctx.store.fetch::<MailSummary>(&query)? {
                println!(
                    "[{}] p{} {}: {}",
                    summary.category, summary.priority, summary.title, summary.summary
                );
                if !summary.tags.is_empty() {
                    println!("    tags: {}", summary.tags.join(", "));
                }
            }
        }
        MailCommand::Classify { .. } => unreachable!(),
    }
    Ok(())
}

fn run_menu(cmd: MenuCommand, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        MenuCommand::Add {
            meal_type,
            items,
            date,
        } => {
            let menu = MessMenu {
                id: new_id(),
                meal_type,
                items: items.into_iter().map(|i| i.trim().to_string()).collect(),
                date: date.unwrap_or_else(|| ctx.today()),
                created_at: ctx.now,
            };
            ctx.store.insert(&menu)?;
            tracing::info!(id = %menu.id, meal = %menu.meal_type, "saved menu");
            println!("{}", menu.id);
        }
        MenuCommand::Show { date } => {
            let date = date.unwrap_or_else(|| ctx.today());
            let query = Query::new()
                .eq("date", date.to_string())
                .order_by("meal_type");
            let meals = ctx.store.fetch::<MessMenu>(&query)?;
            if meals.is_empty() {
                println!("No menu for {date}");
            }
            for meal in meals {
                println!("{}: {}", meal.meal_type, meal.items.join(", "));
            }
        }
    }
    Ok(())
}
