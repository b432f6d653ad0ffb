use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::Level;
use lms::books::dto::BookDto;
use lms::catalog::controller::handle_line;
use lms::catalog::listing::{render_available, render_catalog};
use lms::core::controller::AppState;
use lms::core::domain::Configuration;
use lms::core::library::LibraryResult;
use lms::gateway::GatewayPublisherVia;
use lms::utils::logs::setup_tracing;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "In-memory library catalog")]
struct Cli {
    /// Branch the catalog belongs to, attached to every domain event
    #[arg(long, default_value = "main")]
    branch: String,

    /// Page size used when draining catalog queries
    #[arg(long, default_value_t = 100)]
    page_size: usize,

    /// Where domain events are published
    #[arg(long, value_enum, default_value_t = GatewayPublisherVia::Logs)]
    publisher: GatewayPublisherVia,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Register a few books and walk them through checkout and return
    Demo,
    /// Read JSON requests from stdin, one per line, and answer each with a JSON line
    Shell,
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

async fn run_demo(state: &AppState) -> LibraryResult<()> {
    let catalog = state.catalog.clone();
    let books = [
        BookDto::new("1984", "Orwell"),
        BookDto::ebook("Dune", "Herbert", 900),
        BookDto::print_book("IT", "King", 1138),
    ];
    for book in books.iter() {
        catalog.add_book(book).await?;
    }
    print_lines(&render_catalog(&state.config, &catalog.list_books().await?)?);
    println!("Total books in library: {}", catalog.count().await?);
    println!();

    for title in ["1984", "1984", "NoSuchTitle"] {
        match catalog.checkout_book(title).await {
            Ok(_) => println!("Checked out {}", title),
            Err(err) => println!("Could not check out {}: {}", title, err),
        }
    }
    print_lines(&render_available(&state.config, &catalog.list_available().await?)?);
    println!();

    for title in ["1984", "1984"] {
        match catalog.return_book(title).await {
            Ok(_) => println!("Returned {}", title),
            Err(err) => println!("Could not return {}: {}", title, err),
        }
    }
    print_lines(&render_available(&state.config, &catalog.list_available().await?)?);
    Ok(())
}

async fn run_shell(state: &AppState) -> LibraryResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let res = handle_line(state, line.as_str()).await;
        stdout.write_all(res.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> LibraryResult<()> {
    let cli = Cli::parse();
    setup_tracing(cli.json_logs, if cli.verbose { Level::DEBUG } else { Level::INFO });

    let config = Configuration::new(cli.branch.as_str())
        .with_page_size(cli.page_size)
        .with_publisher(cli.publisher);
    tracing::debug!(config = ?config, "starting catalog");
    let state = AppState::new(config);

    match cli.mode.unwrap_or(Mode::Demo) {
        Mode::Demo => run_demo(&state).await,
        Mode::Shell => run_shell(&state).await,
    }
}
