use clap::{Parser, Subcommand};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};

mod view;

use view::{Listing, ListingBoard};

#[derive(Parser)]
#[command(name = "swapit")]
#[command(about = "A CLI for browsing and posting SwapIT listings")]
struct Cli {
    /// Base URL for the SwapIT service
    #[arg(long, default_value = "http://localhost:4000")]
    service_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all listings and show them, filtered locally
    List {
        /// Case-insensitive search over listing titles
        #[arg(short, long)]
        search: Option<String>,
        /// Only show listings of this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Post a new listing with an image
    Add {
        /// Listing title
        title: String,
        #[arg(long)]
        description: String,
        /// Category, e.g. Laptop or Zubehör
        #[arg(long)]
        category: String,
        /// Your display name
        #[arg(long)]
        name: String,
        /// Contact info, e.g. an e-mail address
        #[arg(long)]
        contact: String,
        #[arg(long)]
        location: String,
        /// Item condition: Neu, Gut, Okay or Defekt
        #[arg(long)]
        condition: Option<String>,
        /// Free-text price, e.g. "25€"
        #[arg(long)]
        price: Option<String>,
        /// Verkauf or Verleih
        #[arg(long)]
        mode: Option<String>,
        /// Path to the image file
        #[arg(long)]
        image: PathBuf,
    },
    /// Delete a listing by id
    Delete {
        id: i32,
    },
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::List { search, category } => {
            list_listings(&client, &cli.service_url, search, category).await?;
        }
        Commands::Add {
            title,
            description,
            category,
            name,
            contact,
            location,
            condition,
            price,
            mode,
            image,
        } => {
            let form = AddListing {
                title,
                description,
                category,
                name,
                contact,
                location,
                condition,
                price,
                mode,
            };
            add_listing(&client, &cli.service_url, form, &image).await?;
        }
        Commands::Delete { id } => {
            delete_listing(&client, &cli.service_url, id).await?;
        }
    }

    Ok(())
}

async fn list_listings(
    client: &Client,
    service_url: &str,
    search: Option<String>,
    category: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let endpoint = format!("{service_url}/items");

    let response = client.get(&endpoint).send().await?;
    if !response.status().is_success() {
        eprintln!("Failed to fetch listings: {}", response.status());
        eprintln!("Response: {}", response.text().await?);
        return Ok(());
    }

    let items: Vec<Listing> = response.json().await?;
    let mut board = ListingBoard::new(items);
    if let Some(term) = search {
        board.set_search(term);
    }
    if let Some(cat) = category {
        board.set_category(cat);
    }

    let visible = board.visible();
    if visible.is_empty() {
        println!("Kein Item mit diesem Titel oder dieser Kategorie gefunden.");
        return Ok(());
    }

    for item in visible {
        println!("#{} {}", item.id, item.title);
        println!("  {}", item.description);
        println!("  Kategorie: {}", item.category);
        println!("  Ort: {}", item.location);
        if let Some(condition) = &item.condition {
            println!("  Zustand: {condition}");
        }
        if let Some(price) = &item.price {
            println!("  Preis: {price}");
        }
        if let Some(mode) = &item.mode {
            println!("  Art: {mode}");
        }
        println!("  Eingestellt: {}", item.created_at);
        println!("  Kontakt: {} – {}", item.name, item.contact);
        println!("  Bild: {service_url}{}", item.image);
        println!();
    }

    Ok(())
}

struct AddListing {
    title: String,
    description: String,
    category: String,
    name: String,
    contact: String,
    location: String,
    condition: Option<String>,
    price: Option<String>,
    mode: Option<String>,
}

async fn add_listing(
    client: &Client,
    service_url: &str,
    listing: AddListing,
    image: &Path,
) -> Result<(), Box<dyn Error>> {
    let endpoint = format!("{service_url}/items");

    let file_name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let bytes = tokio::fs::read(image).await?;

    let mut form = Form::new()
        .text("title", listing.title)
        .text("description", listing.description)
        .text("type", listing.category)
        .text("name", listing.name)
        .text("contact", listing.contact)
        .text("location", listing.location)
        .text("createdAt", chrono::Utc::now().to_rfc3339())
        .part("image", Part::bytes(bytes).file_name(file_name));

    if let Some(condition) = listing.condition {
        form = form.text("condition", condition);
    }
    if let Some(price) = listing.price {
        form = form.text("price", price);
    }
    if let Some(mode) = listing.mode {
        form = form.text("mode", mode);
    }

    let response = client.post(&endpoint).multipart(form).send().await?;

    if response.status().is_success() {
        let message: MessageResponse = response.json().await?;
        println!("{}", message.message);
    } else {
        eprintln!("Failed to post listing: {}", response.status());
        eprintln!("Response: {}", response.text().await?);
    }

    Ok(())
}

async fn delete_listing(
    client: &Client,
    service_url: &str,
    id: i32,
) -> Result<(), Box<dyn Error>> {
    // Fetch the collection up front; on success the row is dropped from the
    // local board rather than re-fetched
    let items: Vec<Listing> = client
        .get(format!("{service_url}/items"))
        .send()
        .await?
        .json()
        .await?;
    let mut board = ListingBoard::new(items);

    let endpoint = format!("{service_url}/items/{id}");
    let response = client.delete(&endpoint).send().await?;

    if response.status().is_success() {
        let message: MessageResponse = response.json().await?;
        board.remove(id);
        println!("{}", message.message);
        println!("Verbleibende Angebote: {}", board.visible().len());
    } else {
        eprintln!("Failed to delete listing: {}", response.status());
        eprintln!("Response: {}", response.text().await?);
    }

    Ok(())
}
