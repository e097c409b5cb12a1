use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, HttpPartyGateway, NewPartyForm, Outcome, Page, Planner, RenderSink, Settings,
};
use shared::domain::PartyId;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "planner_cli", about = "Browse and manage parties on the event service")]
struct Args {
    /// Event service base address; overrides planner.toml and the environment.
    #[arg(long)]
    base_url: Option<String>,
    /// Cohort path segment appended to the base address.
    #[arg(long)]
    cohort: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show the party list.
    List,
    /// Show one party with its guest roster.
    Show { id: i64 },
    /// Create a party; the date is a calendar day (YYYY-MM-DD).
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
    },
    /// Delete a party.
    Delete { id: i64 },
}

/// Keeps only the latest page; the command line prints it once at the end.
#[derive(Default)]
struct LastPage(Option<Page>);

impl RenderSink for LastPage {
    fn present(&mut self, page: Page) {
        self.0 = Some(page);
    }
}

fn resolve_settings(args: &Args) -> Settings {
    let mut settings = load_settings();
    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(cohort) = &args.cohort {
        settings.cohort = cohort.clone();
    }
    settings
}

fn require_applied(outcome: Outcome, action: &str) -> Result<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        other => bail!("{action} did not complete ({other:?}); see log output for details"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = resolve_settings(&args);
    let gateway = HttpPartyGateway::from_settings(&settings)?;
    tracing::debug!(api_root = gateway.api_root(), "using event service");
    let planner = Planner::new(gateway, LastPage::default());
    planner.bootstrap().await;

    match args.command {
        Command::List => {}
        Command::Show { id } => {
            require_applied(planner.select_party(PartyId(id)).await, "loading the party")?;
        }
        Command::Create {
            name,
            description,
            date,
            location,
        } => {
            let form = NewPartyForm {
                name,
                description,
                date,
                location,
            };
            let draft = form.to_draft()?;
            require_applied(planner.submit_new_party(draft).await, "creating the party")?;
        }
        Command::Delete { id } => {
            require_applied(planner.delete_party(PartyId(id)).await, "deleting the party")?;
        }
    }

    let page = planner
        .inspect(|_, sink| sink.0.clone())
        .await
        .ok_or_else(|| anyhow!("event service unreachable; nothing to show"))?;
    print!("{}", page.to_text());
    Ok(())
}
