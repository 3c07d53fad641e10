//! CLI interface for Handraiser.
//!
//! Three jobs, one binary:
//!
//! - `handraiser tracker build`: write the engagement tracker workbook.
//! - `handraiser video generate|styles|voices`: render promo clips for posts.
//! - `handraiser post [DAY|POST_ID]`: put today's post on the clipboard.
//!
//! Every command works against a project root (`--root`, else `project-root`
//! in the config, else the current directory).

mod format;
mod post;
mod tracker;
mod video;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

use post::PostArgs;
use tracker::TrackerCommand;
use video::VideoCommand;

/// Handraiser: content tooling for a LinkedIn campaign.
#[derive(Debug, Parser)]
#[command(name = "handraiser", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Project directory holding `posts/`, `videos/`, and `tracking/`.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Weekly loop:
  1. handraiser post                      copy today's post, open LinkedIn
  2. handraiser video generate --post EC-004 --style pain-point --both
  3. handraiser tracker build             fresh workbook for logging results

Lookups:
  handraiser post --list                  every scheduled post with its title
  handraiser post friday --dry-run        print Friday's copy instead of posting
  handraiser video styles                 available prompt templates";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Engagement tracker workbook.
    Tracker {
        #[command(subcommand)]
        command: TrackerCommand,
    },

    /// Promo video generation.
    Video {
        #[command(subcommand)]
        command: VideoCommand,
    },

    /// Copy a scheduled post to the clipboard and open LinkedIn.
    ///
    /// With no argument, posts today's entry. A day name picks that day in
    /// the current week; anything else is treated as a post ID.
    Post(PostArgs),
}

/// Run the CLI, returning an error message on failure.
pub async fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();
    let root = config.project_root(cli.root);
    tracing::debug!(root = %root.display(), "project root");

    match cli.command {
        Command::Tracker { command } => match command {
            TrackerCommand::Build { out } => tracker::cmd_build(&root, out),
        },
        Command::Video { command } => match command {
            VideoCommand::Generate(args) => video::cmd_generate(config, &root, &args).await,
            VideoCommand::Styles => video::cmd_styles(config, &root),
            VideoCommand::Voices => video::cmd_voices(config, &root).await,
        },
        Command::Post(args) => post::cmd_post(config, &root, &args),
    }
}
