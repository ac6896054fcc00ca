//! CLI Adapter.

mod generate;
mod grid;
mod preview;
mod scene;
mod shot;
mod status;

use clap::{Parser, Subcommand};

use crate::app::api::{self, PrefsUpdate};
use crate::domain::{AppError, FontSize, Language};

#[derive(Parser)]
#[command(name = "storygrid")]
#[command(version)]
#[command(
    about = "Build bilingual storyboard grid prompts from a reference image with Gemini",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a .storygrid/ storyboard in the current directory
    #[clap(visible_alias = "i")]
    Init,
    /// Show grid, scene and shots
    #[clap(visible_alias = "st")]
    Status,
    /// Select the grid shape (interactive when no label is given)
    #[clap(visible_alias = "g")]
    Grid {
        /// Catalog label such as 3x3
        #[arg(conflicts_with_all = ["rows", "cols", "list"])]
        label: Option<String>,
        /// Custom row count
        #[arg(long, requires = "cols")]
        rows: Option<u32>,
        /// Custom column count
        #[arg(long, requires = "rows")]
        cols: Option<u32>,
        /// List catalog grids
        #[arg(short, long)]
        list: bool,
    },
    /// Edit shot types and shot text
    #[clap(visible_alias = "s")]
    Shot {
        #[command(subcommand)]
        command: shot::ShotCommands,
    },
    /// Analyze a reference image or edit the scene description
    #[clap(visible_alias = "sc")]
    Scene {
        #[command(subcommand)]
        command: scene::SceneCommands,
    },
    /// Generate shot descriptions with Gemini
    #[clap(visible_aliases = ["gen", "ge"])]
    Generate {
        /// Regenerate only this shot
        shot: Option<u32>,
    },
    /// Print the copyable prompt
    #[clap(visible_alias = "p")]
    Preview {
        /// Language to render (zh, en); defaults to the preference
        #[arg(short, long)]
        lang: Option<Language>,
        /// Write the prompt to a file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Show or change preferences
    Prefs {
        /// Active content language (zh, en)
        #[arg(short, long, conflicts_with = "toggle")]
        lang: Option<Language>,
        /// Switch to the other content language
        #[arg(short, long)]
        toggle: bool,
        /// Font size (small, medium, large)
        #[arg(short, long)]
        font_size: Option<FontSize>,
    },
    /// Edit the top prompt line of the export
    Prompt {
        #[command(subcommand)]
        command: PromptCommands,
    },
    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
}

#[derive(Subcommand)]
enum PromptCommands {
    /// Replace the top prompt
    Set {
        /// New top prompt text
        text: String,
    },
    /// Restore the default top prompt for the current grid
    Reset,
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Store the API key in .storygrid/credential
    Set {
        /// Gemini API key
        key: String,
    },
    /// Remove the stored API key
    Clear,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Init => run_init(),
        Commands::Status => status::run_status(),
        Commands::Grid { label, rows, cols, list } => grid::run_grid(label, rows.zip(cols), list),
        Commands::Shot { command } => shot::run_shot(command),
        Commands::Scene { command } => scene::run_scene(command),
        Commands::Generate { shot } => generate::run_generate(shot),
        Commands::Preview { lang, output } => preview::run_preview(lang, output),
        Commands::Prefs { lang, toggle, font_size } => {
            run_prefs(PrefsUpdate { language: lang, toggle_language: toggle, font_size })
        }
        Commands::Prompt { command } => run_prompt(command),
        Commands::Key { command } => run_key(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_init() -> Result<(), AppError> {
    let state = api::init()?;
    println!(
        "✅ Initialized .storygrid/ storyboard ({} grid, {} shots)",
        state.grid.label,
        state.slots.len()
    );
    Ok(())
}

fn run_prefs(update: PrefsUpdate) -> Result<(), AppError> {
    let prefs = api::update_prefs(update)?;
    println!("language: {}", prefs.language);
    println!("font size: {}", prefs.font_size.as_str());
    Ok(())
}

fn run_prompt(command: PromptCommands) -> Result<(), AppError> {
    let top_prompt = match command {
        PromptCommands::Set { text } => api::set_top_prompt(Some(&text))?,
        PromptCommands::Reset => api::set_top_prompt(None)?,
    };
    println!("✅ Top prompt: {}", top_prompt);
    Ok(())
}

fn run_key(command: KeyCommands) -> Result<(), AppError> {
    match command {
        KeyCommands::Set { key } => {
            api::set_key(&key)?;
            println!("✅ Stored API key in .storygrid/credential");
        }
        KeyCommands::Clear => {
            api::clear_key()?;
            println!("✅ Removed stored API key");
        }
    }
    Ok(())
}
