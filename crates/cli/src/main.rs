use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::portraits::{resolve_portrait, split_people};
use data_loader::{Catalog, DataLoadError, DatasetRegistry, LoadStatus, Movie};
use pipeline::{
    box_office_series, genre_options, most_viewed, most_viewed_series, platform_options,
    recommend_from_catalog, top_rated, ChartSeries, DashboardSummary, DurationBucket,
    FilterCriteria, GenreChoice, Recommendation, RecommendationOutcome, DEFAULT_LIMIT, TOP_N,
    TOP_RATED_MIN_VOTES,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// CineDash - movie dashboard data core
#[derive(Parser)]
#[command(name = "cinedash")]
#[command(about = "Load the movie dashboard's CSV tables and recommend movies", long_about = None)]
struct Cli {
    /// Directory holding the CSV tables
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// JSON file replacing the built-in dataset registry
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Directory of `Firstname_Lastname.jpg` portraits
    #[arg(long, default_value = "imagenes/directores_actores")]
    image_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the load status of every dataset
    Status {
        /// Print the statuses as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the home page numbers and the top lists
    Stats,

    /// List the genres and platforms available for filtering
    Genres,

    /// Recommend movies matching the given criteria
    Recommend {
        /// Genre to keep, or "all"
        #[arg(long, default_value = "all")]
        genre: String,

        /// Earliest release year
        #[arg(long, default_value_t = 1900)]
        year_min: i32,

        /// Latest release year
        #[arg(long, default_value_t = 2100)]
        year_max: i32,

        /// Minimum rating
        #[arg(long, default_value_t = 0.0)]
        min_rating: f32,

        /// Duration bucket: any, short (<90), medium (90-120) or long (>120)
        #[arg(long, default_value = "any")]
        duration: String,

        /// Only movies available on this platform
        #[arg(long)]
        platform: Option<String>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = match &cli.registry {
        Some(path) => DatasetRegistry::from_json_file(path)
            .with_context(|| format!("Failed to read registry {}", path.display()))?,
        None => DatasetRegistry::default(),
    };

    let start = Instant::now();
    let catalog = Catalog::load(&cli.data_dir, &registry);
    debug!(
        "Loaded {} datasets from {} in {:?}",
        catalog.report().succeeded().count(),
        cli.data_dir.display(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Status { json } => handle_status(&catalog, json)?,
        Commands::Stats => handle_stats(&catalog),
        Commands::Genres => handle_genres(&catalog),
        Commands::Recommend {
            genre,
            year_min,
            year_max,
            min_rating,
            duration,
            platform,
            limit,
            json,
        } => {
            let genre: GenreChoice = genre.parse()?;
            let duration: DurationBucket = duration.parse()?;
            let mut criteria = FilterCriteria::new(genre, (year_min, year_max), min_rating, duration)
                .context("Invalid recommendation criteria")?;
            if let Some(platform) = platform {
                criteria = criteria.with_platform(platform);
            }
            handle_recommend(&catalog, &criteria, limit, json, &cli.image_dir)?
        }
    }

    Ok(())
}

/// Handle the 'status' command
fn handle_status(catalog: &Catalog, json: bool) -> Result<()> {
    let statuses = catalog.report().statuses();
    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    println!("{}", "Dataset status:".bold().blue());
    for status in &statuses {
        let marker = match status.status {
            LoadStatus::Ok => "✓".green(),
            LoadStatus::Warning => "!".yellow(),
            LoadStatus::Error => "✗".red(),
        };
        println!("{} {:<24} {}", marker, status.key, status.detail);
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(catalog: &Catalog) {
    let summary = DashboardSummary::from_catalog(catalog);
    let count = |n: Option<usize>| n.map_or_else(|| "n/a".dimmed().to_string(), |n| n.to_string());

    println!("{}", "Dashboard:".bold().blue());
    println!("{}Movies: {}", "• ".green(), count(summary.movie_count));
    println!("{}Most viewed: {}", "• ".green(), count(summary.most_viewed_count));
    println!("{}Best rated: {}", "• ".green(), count(summary.top_rated_count));
    println!(
        "{}Datasets: {} loaded, {} failed",
        "• ".cyan(),
        summary.datasets_loaded,
        summary.datasets_failed
    );

    if let Some(movies) = catalog.movies() {
        print_movie_list("Most voted:", &most_viewed(movies, TOP_N));
        print_movie_list(
            &format!("Best rated (at least {} votes):", TOP_RATED_MIN_VOTES),
            &top_rated(movies, TOP_RATED_MIN_VOTES, TOP_N),
        );
    }

    print_chart("Views:", most_viewed_series(catalog));
    print_chart("Box office:", box_office_series(catalog));
}

/// Handle the 'genres' command
fn handle_genres(catalog: &Catalog) {
    let Some(movies) = catalog.movies() else {
        println!("{}", "The movie table is not loaded.".yellow());
        return;
    };
    println!("{}", "Genres:".bold().blue());
    for genre in genre_options(movies) {
        println!("  - {}", genre);
    }
    println!("{}", "Platforms:".bold().blue());
    for platform in platform_options(movies) {
        println!("  - {}", platform);
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: &Catalog,
    criteria: &FilterCriteria,
    limit: usize,
    json: bool,
    image_dir: &Path,
) -> Result<()> {
    let outcome = recommend_from_catalog(catalog, criteria, limit);
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match &outcome {
        RecommendationOutcome::DataUnavailable => {
            println!("{}", "The movie table is not loaded; nothing to recommend.".yellow());
        }
        RecommendationOutcome::NoMatch => {
            println!("{}", "No movies match these criteria.".yellow());
        }
        RecommendationOutcome::Ranked(recommendations) => {
            print_recommendations(recommendations, image_dir);
        }
    }
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation], image_dir: &Path) {
    print!("{}", "Movie Recommendations:\n".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        let duration = rec
            .duration
            .map(|m| format!("{} min", m))
            .unwrap_or_else(|| "? min".to_string());
        println!(
            "{}. {} ({}) [{}] {} - Rating: {:.1}",
            (i + 1).to_string().green(),
            rec.title.bold(),
            rec.year,
            rec.genres.join(", "),
            duration,
            rec.rating
        );
        if let Some(director) = &rec.director {
            println!("   Director: {}", director);
        }
        if let Some(actor) = &rec.lead_actor {
            println!("   Starring: {}", actor);
        }
        if let Some(platform) = &rec.where_to_watch {
            println!("   Watch on: {}", platform.cyan());
        }
        for person in rec.people().into_iter().flat_map(split_people) {
            match resolve_portrait(image_dir, &person) {
                Some(path) => println!("   Portrait: {}", path.display()),
                None => println!("   {}", format!("No portrait for {}", person).dimmed()),
            }
        }
    }
}

fn print_movie_list(title: &str, movies: &[&Movie]) {
    println!("{}", title.bold().blue());
    for (i, movie) in movies.iter().enumerate() {
        let rating = movie
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}. {} - Rating: {} ({} votes)",
            (i + 1).to_string().green(),
            movie.title,
            rating,
            movie.votes.unwrap_or(0)
        );
    }
}

/// Print one chart, or a warning when its table cannot be charted
fn print_chart(title: &str, series: Option<Result<ChartSeries, DataLoadError>>) {
    match chart_or_warning(series) {
        Some(Ok(series)) => print_series(title, &series),
        Some(Err(message)) => println!("{} {} {}", "!".yellow(), title, message.yellow()),
        None => {}
    }
}

fn chart_or_warning(
    series: Option<Result<ChartSeries, DataLoadError>>,
) -> Option<Result<ChartSeries, String>> {
    series.map(|result| {
        result.map_err(|err| {
            warn!("Chart skipped: {}", err);
            format!("chart unavailable: {}", err)
        })
    })
}

fn print_series(title: &str, series: &ChartSeries) {
    println!("{}", title.bold().blue());
    let max = series.points.first().map_or(0.0, |p| p.value);
    for point in &series.points {
        let width = if max > 0.0 {
            (point.value / max * 30.0).round() as usize
        } else {
            0
        };
        println!("  {:<30} {} {}", point.label, "█".repeat(width).cyan(), point.value);
    }
}
