use std::error::Error;
use std::process;

use dotenv::dotenv;
use structopt::StructOpt;
use uuid::Uuid;

use client::api::ApiClient;
use client::forms;
use client::views;
use log::{debug, initialize_logger, Logger};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "portal",
    about = "Manage internship listings from the terminal"
)]
struct Opt {
    /// Base URL of the listings backend
    #[structopt(
        long,
        env = "BACKEND_BASE_URL",
        default_value = "http://localhost:8000/"
    )]
    base_url: String,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Fill in the creation form and submit a new listing
    Add,
    /// Fetch and render the listings grid
    List,
    /// Edit a listing in a pre-populated form; empty answers keep current values
    Edit {
        #[structopt(parse(try_from_str = Uuid::parse_str))]
        id: Uuid,
    },
    /// Delete a listing after explicit confirmation
    Delete {
        #[structopt(parse(try_from_str = Uuid::parse_str))]
        id: Uuid,

        /// Skip the confirmation prompt
        #[structopt(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let opt = Opt::from_args();
    let logger = initialize_logger();
    let client = ApiClient::new(&opt.base_url)?;

    match opt.command {
        Command::Add => add(&logger, &client).await,
        Command::List => list(&logger, &client).await,
        Command::Edit { id } => edit(&logger, &client, &id).await,
        Command::Delete { id, yes } => delete(&logger, &client, &id, yes).await,
    }
}

async fn add(logger: &Logger, client: &ApiClient) -> Result<(), Box<dyn Error>> {
    let listing = forms::creation_form()?;

    debug!(logger, "Submitting new listing...");

    match client.create(&listing).await {
        Ok(created) => {
            println!("Internship added successfully!");
            println!("{}", views::detail(&created));
        }
        Err(e) => fail("Error adding internship", &e),
    }

    Ok(())
}

async fn list(logger: &Logger, client: &ApiClient) -> Result<(), Box<dyn Error>> {
    debug!(logger, "Fetching internships...");

    match client.list().await {
        Ok(ref listings) if listings.is_empty() => println!("No internships found."),
        Ok(listings) => {
            println!("{}", views::grid(&listings));
            println!("Use `portal edit <id>` or `portal delete <id>` to manage a listing.");
        }
        Err(e) => fail("Error fetching internships", &e),
    }

    Ok(())
}

async fn edit(logger: &Logger, client: &ApiClient, id: &Uuid) -> Result<(), Box<dyn Error>> {
    debug!(logger, "Fetching internship..."; "id" => format!("{}", id));

    let current = match client.retrieve(id).await {
        Ok(listing) => listing,
        Err(e) => fail("Error loading internship details", &e),
    };

    let update = forms::edit_form(&current)?;

    if update.is_empty() {
        println!("Nothing changed.");
        return Ok(());
    }

    debug!(logger, "Saving internship..."; "id" => format!("{}", id));

    match client.update(id, &update).await {
        Ok(updated) => {
            println!("Internship updated successfully!");
            println!("{}", views::detail(&updated));
        }
        Err(e) => fail("Error saving internship", &e),
    }

    Ok(())
}

async fn delete(
    logger: &Logger,
    client: &ApiClient,
    id: &Uuid,
    yes: bool,
) -> Result<(), Box<dyn Error>> {
    if !yes && !forms::confirm("Are you sure you want to delete this internship?")? {
        println!("Cancelled.");
        return Ok(());
    }

    debug!(logger, "Deleting internship..."; "id" => format!("{}", id));

    match client.delete(id).await {
        Ok(message) => println!("{}", message),
        Err(e) => fail("Error deleting internship", &e),
    }

    Ok(())
}

fn fail(notice: &str, error: &dyn Error) -> ! {
    eprintln!("{}. {}", notice, error);
    process::exit(1);
}
