use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use nfl_scraper::{apis, observability, pipeline, server};

#[derive(Parser)]
#[command(name = "nfl-scraper")]
#[command(about = "NFL schedule scraper, scoreboard client, and prediction API")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and normalize a season's regular-season schedule
    Schedule {
        /// Season year, e.g. 2024
        #[arg(long)]
        year: i32,
        /// Write the normalized batch to a CSV file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fetch final scores from the ESPN scoreboard for one date
    Scoreboard {
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
    },
    /// Run the prediction web service
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    observability::logging::init_logging();

    match cli.command {
        Commands::Schedule { year, out } => {
            let html = apis::pfr::fetch_schedule_page(year).await?;
            let table = apis::pfr::extract_games_table(&html, year)?;
            let schedule = pipeline::normalize::normalize(&table, year)?;
            info!(
                games = schedule.games.len(),
                orientation = ?schedule.orientation,
                "normalized {} regular-season schedule",
                year
            );

            match out {
                Some(path) => {
                    pipeline::csv_out::write_csv(&schedule, &path)?;
                    println!("wrote {} games to {}", schedule.games.len(), path.display());
                }
                None => {
                    for game in &schedule.games {
                        println!(
                            "{:<10} {} {} @ {}",
                            game.game_date, game.game_id, game.away_team, game.home_team
                        );
                    }
                }
            }
        }
        Commands::Scoreboard { date } => {
            let games = apis::espn::fetch_scoreboard(date).await?;
            for game in &games {
                println!(
                    "{} {} {} - {} {}",
                    game.date, game.away_team, game.away_score, game.home_score, game.home_team
                );
            }
        }
        Commands::Serve { port } => {
            server::start_server(port).await?;
        }
    }

    Ok(())
}
