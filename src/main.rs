#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use redadeg::app::{App, FormSubmission, LogMap, SubmitOutcome};
use redadeg::database::SqliteStore;
use redadeg::types::{Coords, Details, Kind, Workout};
use redadeg::{cli, utils};

#[macro_use]
extern crate redadeg;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let medium = SqliteStore::open(&cli.db)?;
    dlog!("db={}", cli.db.display());

    let mut app = App::start(medium, LogMap)?;

    match cli.cmd {
        Some(cli::Cmd::Run {
            lat,
            lng,
            distance,
            duration,
            cadence,
        }) => submit(
            &mut app,
            FormSubmission {
                kind: Kind::Running,
                distance,
                duration,
                cadence_or_elevation: cadence,
                click_coords: Coords { lat, lng },
            },
        ),
        Some(cli::Cmd::Ride {
            lat,
            lng,
            distance,
            duration,
            elevation,
        }) => submit(
            &mut app,
            FormSubmission {
                kind: Kind::Cycling,
                distance,
                duration,
                cadence_or_elevation: elevation,
                click_coords: Coords { lat, lng },
            },
        ),
        Some(cli::Cmd::Clear) => app.reset(),
        None => {
            print_list(app.workouts(), cli.details);
            Ok(())
        }
    }
}

fn submit(app: &mut App<SqliteStore, LogMap>, form: FormSubmission) -> Result<()> {
    match app.submit(form)? {
        SubmitOutcome::Recorded { .. } => {
            if let Some(workout) = app.workouts().last() {
                println!("{}", summary_line(workout));
            }
            Ok(())
        }
        SubmitOutcome::Rejected { message } => {
            println!("{message}");
            Ok(())
        }
    }
}

fn print_list(workouts: &[Workout], details: bool) {
    for (i, w) in workouts.iter().enumerate() {
        if details {
            let created = w.created_at.to_rfc3339();
            println!("{}\t{}\t{created}\t{}", i + 1, w.id, summary_line(w));
        } else {
            println!("{}\t{}", i + 1, summary_line(w));
        }
    }
}

fn summary_line(w: &Workout) -> String {
    let base = format!(
        "{}\t{} km\t{}",
        w.description,
        w.distance_km,
        utils::format_duration_min(w.duration_min)
    );
    match w.details {
        Details::Running {
            cadence_spm,
            pace_min_per_km,
        } => format!(
            "{base}\t{} min/km\t{cadence_spm} spm",
            utils::format_metric(pace_min_per_km)
        ),
        Details::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => format!(
            "{base}\t{} km/h\t{elevation_gain_m} m",
            utils::format_metric(speed_km_per_h)
        ),
    }
}
