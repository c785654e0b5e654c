use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use survivor_draft_engine::{
    DiscordPublisher, Draft, DraftEngine, EngineOptions, SeasonRoster,
};

#[derive(Parser)]
#[command(name = "draft-cli")]
#[command(about = "Survivor draft scoring CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding per-season draft files (drafts/<season>/<drafter>.txt)
    #[arg(long, default_value = "drafts")]
    drafts_dir: PathBuf,

    /// Directory holding season roster JSON files (rosters/<season>.json)
    #[arg(long, default_value = "rosters")]
    rosters_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate and display scores for a season's drafts
    Score {
        /// Input file containing a single draft
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Drafter name(s) to look up, or "*" for every draft in the season
        #[arg(short, long, value_delimiter = ',')]
        drafters: Vec<String>,

        /// Season number
        #[arg(short, long)]
        season: u32,

        /// Validate contestant names against the roster before scoring
        #[arg(long)]
        validate: bool,

        /// Show points available
        #[arg(short = 'p', long)]
        points_available: bool,

        /// Publish scores to the Discord bot
        #[arg(long)]
        publish: bool,

        /// Discord bot publish endpoint
        #[arg(long, default_value = "http://localhost:8080/publish")]
        publish_url: String,

        /// Names of contestants voted out this week
        #[arg(long, value_delimiter = ',')]
        voted_out: Vec<String>,
    },

    /// Normalize contestant names in draft files against the canonical roster
    FixDrafts {
        /// Season number
        #[arg(short, long)]
        season: u32,

        /// Drafter name(s) to fix, or "*" for every draft in the season
        #[arg(short, long, value_delimiter = ',')]
        drafters: Vec<String>,

        /// Preview changes without modifying files
        #[arg(long)]
        dry_run: bool,

        /// Minimum confidence threshold for fuzzy matching
        #[arg(long, default_value_t = 0.70)]
        threshold: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            file,
            drafters,
            season,
            validate,
            points_available,
            publish,
            publish_url,
            voted_out,
        } => {
            run_score(
                &cli.drafts_dir,
                &cli.rosters_dir,
                file,
                drafters,
                season,
                validate,
                points_available,
                publish,
                &publish_url,
                voted_out,
            )
            .await
        }
        Commands::FixDrafts {
            season,
            drafters,
            dry_run,
            threshold,
        } => run_fix_drafts(
            &cli.drafts_dir,
            &cli.rosters_dir,
            season,
            drafters,
            dry_run,
            threshold,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_score(
    drafts_dir: &Path,
    rosters_dir: &Path,
    file: Option<PathBuf>,
    drafters: Vec<String>,
    season: u32,
    validate: bool,
    points_available: bool,
    publish: bool,
    publish_url: &str,
    voted_out: Vec<String>,
) -> anyhow::Result<()> {
    if (file.is_some() && !drafters.is_empty()) || (file.is_none() && drafters.is_empty()) {
        bail!("you must specify either a file or drafters, but not both");
    }
    if publish && voted_out.is_empty() {
        bail!("--voted-out is required when publishing");
    }

    let drafters = expand_wildcard(drafts_dir, season, drafters)?;

    let mut drafts = Vec::new();
    let mut failed_drafts = Vec::new();
    if let Some(path) = file {
        drafts.push(load_draft(&path)?);
    } else {
        for drafter in &drafters {
            let path = drafts_dir.join(season.to_string()).join(format!("{drafter}.txt"));
            match load_draft(&path) {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    tracing::error!(drafter = %drafter, error = %e, "failed to process draft file");
                    failed_drafts.push(drafter.clone());
                }
            }
        }
    }

    let finals = load_finals(drafts_dir, season)?;

    let engine = DraftEngine::new(EngineOptions {
        show_points_available: points_available,
        ..EngineOptions::default()
    });

    if validate {
        if !failed_drafts.is_empty() {
            bail!("validation failed: could not process drafts: {failed_drafts:?}");
        }
        let roster = SeasonRoster::load(rosters_dir, season)
            .context("failed to load roster")?;
        let issues = engine.validate_names(&drafts, &finals, &roster);
        if !issues.is_empty() {
            println!("Validating drafts for season {season}...");
            for issue in &issues {
                println!(
                    "  {}: {:?} is not an exact match for any contestant",
                    issue.source, issue.name
                );
            }
            println!(
                "Suggestion: run 'draft-cli fix-drafts -s {season} -d \"*\"' to automatically correct names"
            );
            bail!(
                "validation failed: {} names do not exactly match roster",
                issues.len()
            );
        }
        println!("Validation passed for season {season}");
    }

    tracing::info!(season, "calculating score for each draft");
    let board = engine.leaderboard(&drafts, &finals)?;

    if publish {
        let message = engine.build_message(season, &voted_out, &board);
        match DiscordPublisher::new(publish_url) {
            Ok(publisher) => engine.publish(&publisher, &message).await,
            Err(e) => tracing::warn!(error = %e, "could not create publisher"),
        }
    }

    let width = board.max_drafter_len();
    for row in &board.rows {
        if points_available {
            println!(
                "{:<width$}:\t{}\t(points available: {})",
                row.drafter, row.score, row.points_available
            );
        } else {
            println!("{:<width$}:\t{}", row.drafter, row.score);
        }
    }

    Ok(())
}

fn run_fix_drafts(
    drafts_dir: &Path,
    rosters_dir: &Path,
    season: u32,
    drafters: Vec<String>,
    dry_run: bool,
    threshold: f64,
) -> anyhow::Result<()> {
    if drafters.is_empty() {
        bail!("you must specify drafters (or \"*\")");
    }

    let roster = SeasonRoster::load(rosters_dir, season).context("failed to load roster")?;
    let drafters = expand_wildcard(drafts_dir, season, drafters)?;

    let engine = DraftEngine::new(EngineOptions {
        match_threshold: threshold,
        ..EngineOptions::default()
    });

    let mut total_corrections = 0;
    let mut total_errors = 0;

    for drafter in &drafters {
        let path = drafts_dir.join(season.to_string()).join(format!("{drafter}.txt"));
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to read draft file");
                total_errors += 1;
                continue;
            }
        };

        if dry_run {
            println!("[DRY RUN] Previewing changes for: {}", path.display());
        } else {
            println!("Fixing draft: {}", path.display());
        }

        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let outcome = engine.fix_lines(&lines, &roster);

        for correction in &outcome.corrections {
            println!(
                "  Line {}: {:?} -> {:?} ({}, confidence: {:.2})",
                correction.line,
                correction.original,
                correction.corrected,
                correction.match_type,
                correction.score
            );
        }
        for failure in &outcome.failures {
            println!(
                "  ERROR Line {}: {:?} - {}",
                failure.line, failure.name, failure.reason
            );
        }

        total_corrections += outcome.corrections.len();
        total_errors += outcome.failures.len();

        if !dry_run && outcome.modified {
            std::fs::write(&path, outcome.lines.join("\n"))
                .with_context(|| format!("failed to write draft file {}", path.display()))?;
            println!("Draft saved to: {}", path.display());
        } else if dry_run {
            println!("[DRY RUN] No changes written to file");
        }
    }

    if dry_run {
        println!("[DRY RUN] Total: {total_corrections} corrections would be made, {total_errors} errors");
    } else {
        println!("Total: {total_corrections} corrections made, {total_errors} errors");
    }

    Ok(())
}

/// Expand a lone "*" into every drafter with a .txt file in the season
/// directory, skipping the finals board.
fn expand_wildcard(
    drafts_dir: &Path,
    season: u32,
    drafters: Vec<String>,
) -> anyhow::Result<Vec<String>> {
    if !(drafters.len() == 1 && drafters[0] == "*") {
        return Ok(drafters);
    }

    let season_dir = drafts_dir.join(season.to_string());
    let mut expanded = Vec::new();
    for entry in std::fs::read_dir(&season_dir)
        .with_context(|| format!("unable to list draft files in {}", season_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if stem != "final" {
                expanded.push(stem.to_string());
            }
        }
    }
    expanded.sort();
    tracing::debug!(?expanded, "expanded drafter wildcard");
    Ok(expanded)
}

fn load_draft(path: &Path) -> anyhow::Result<Draft> {
    tracing::info!(path = %path.display(), "processing draft file");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Draft::parse(&text)?)
}

/// Locate the finals board: prefer drafts/<season>/final.txt, fall back
/// to the deprecated finals/<season>.txt, otherwise scaffold an empty
/// in-progress board.
fn load_finals(drafts_dir: &Path, season: u32) -> anyhow::Result<Draft> {
    let path = drafts_dir.join(season.to_string()).join("final.txt");
    if path.exists() {
        return load_draft(&path);
    }

    let old_path = PathBuf::from("finals").join(format!("{season}.txt"));
    if old_path.exists() {
        tracing::warn!(
            old_path = %old_path.display(),
            new_path = %path.display(),
            "using deprecated finals location"
        );
        return load_draft(&old_path);
    }

    tracing::warn!(path = %path.display(), "no finals found, creating empty final.txt");
    let finals = Draft::empty_final(season, 18);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, finals.to_text())?;
    Ok(finals)
}
