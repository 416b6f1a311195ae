// SPDX-License-Identifier: MIT OR Apache-2.0
//! `motionspec` - motion spec timelines from the terminal.
//!
//! Loads a project file (RON or JSON), lays out its properties on the
//! compressed timeline and prints the result, or performs simple edits.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use motionspec_editor::{
    EditCommand, EditorSession, EditorSettings, Project, TextRenderer, PROJECT_EXTENSION,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "motionspec")]
#[command(about = "Motion specs for developer handoff - non-linear timeline layout")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ./motionspec.ron when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every property as a bar on the compressed timeline
    Layout {
        /// Project file path
        file: PathBuf,

        /// Width of the bar area in characters
        #[arg(long)]
        width: Option<usize>,
    },

    /// Print the active and idle segments of the timeline scale
    Inspect {
        /// Project file path
        file: PathBuf,
    },

    /// Write a sample project
    Init {
        /// Output path
        file: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Move a track to another position and save the project
    MoveTrack {
        /// Project file path
        file: PathBuf,

        /// Current track index
        from: usize,

        /// Destination track index
        to: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = EditorSettings::load_or_default(cli.config.as_deref())
        .context("Failed to load settings")?;
    init_tracing(&settings);

    tracing::debug!("Starting motionspec v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Layout { file, width } => layout(&file, width, &settings)?,
        Commands::Inspect { file } => inspect(&file, &settings)?,
        Commands::Init { file, force } => init(file, force)?,
        Commands::MoveTrack { file, from, to } => move_track(&file, from, to, &settings)?,
    }

    Ok(())
}

fn init_tracing(settings: &EditorSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_session(file: &Path, settings: &EditorSettings) -> Result<EditorSession> {
    let project = Project::load(file)
        .with_context(|| format!("Failed to open project {}", file.display()))?;
    Ok(EditorSession::new(project, settings.timeline.scale_options()))
}

fn layout(file: &Path, width: Option<usize>, settings: &EditorSettings) -> Result<()> {
    let mut session = open_session(file, settings)?;
    let layout = session.layout();

    let mut renderer = TextRenderer::new(&settings.render);
    if let Some(width) = width {
        renderer = renderer.with_bar_width(width);
    }

    println!("{}", session.project().name);
    if !session.project().description.is_empty() {
        println!("{}", session.project().description);
    }
    println!();
    print!("{}", renderer.render_layout(&layout));

    Ok(())
}

fn inspect(file: &Path, settings: &EditorSettings) -> Result<()> {
    let mut session = open_session(file, settings)?;
    let renderer = TextRenderer::new(&settings.render);

    println!("{}", session.project().name);
    print!("{}", renderer.render_segments(session.scale()));

    Ok(())
}

fn init(file: Option<PathBuf>, force: bool) -> Result<()> {
    let file = file.unwrap_or_else(|| PathBuf::from(format!("sample.{PROJECT_EXTENSION}")));
    if file.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", file.display());
    }

    Project::sample()
        .save(&file)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    println!("Wrote sample project to {}", file.display());
    Ok(())
}

fn move_track(file: &Path, from: usize, to: usize, settings: &EditorSettings) -> Result<()> {
    let mut session = open_session(file, settings)?;
    session
        .execute(EditCommand::MoveTrack { from, to })
        .context("Failed to move track")?;

    session
        .project()
        .save(file)
        .with_context(|| format!("Failed to save {}", file.display()))?;
    session.mark_saved();

    for (index, track) in session.project().tracks().enumerate() {
        println!("{index}: {}", track.name);
    }
    Ok(())
}
