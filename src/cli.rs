use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DB: &str = "redadeg.sqlite";

#[derive(Parser, Debug)]
#[command(
    name = "redadeg",
    about = "Map-pinned workout diary: log runs and rides, keep them across restarts"
)]
pub struct Cli {
    /// SQLite file holding the workout list.
    #[arg(long, value_name = "DB", default_value = DEFAULT_DB, global = true)]
    pub db: PathBuf,

    /// Show id and creation timestamp in the list.
    #[arg(long)]
    pub details: bool,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// With no subcommand the stored workout list is printed.
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a run at a map pin.
    Run {
        /// Pin latitude.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Pin longitude.
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Distance in km.
        #[arg(long, allow_negative_numbers = true)]
        distance: f64,

        /// Duration in minutes.
        #[arg(long, allow_negative_numbers = true)]
        duration: f64,

        /// Cadence in steps per minute.
        #[arg(long, allow_negative_numbers = true)]
        cadence: f64,
    },

    /// Record a ride at a map pin.
    Ride {
        /// Pin latitude.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Pin longitude.
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Distance in km.
        #[arg(long, allow_negative_numbers = true)]
        distance: f64,

        /// Duration in minutes.
        #[arg(long, allow_negative_numbers = true)]
        duration: f64,

        /// Elevation gain in meters.
        #[arg(long, allow_negative_numbers = true)]
        elevation: f64,
    },

    /// Delete every stored workout.
    Clear,
}
