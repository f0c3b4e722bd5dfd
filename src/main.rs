use std::env;

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use yansi::Paint;

use cligraph::{app, chart};

#[macro_use]
extern crate log;

/// Sets up colours and the logger, which writes to stderr.
fn configure_output(option: &str, verbose: bool) {
    let mut color_choice = ColorChoice::Auto;
    match option {
        "no" => {
            Paint::disable();
            color_choice = ColorChoice::Never;
        }
        "auto" => match env::var("TERM") {
            Ok(value) if value == "dumb" => {
                Paint::disable();
                color_choice = ColorChoice::Never;
            }
            _ => {
                if !atty::is(atty::Stream::Stdout) {
                    Paint::disable();
                }
            }
        },
        _ => color_choice = ColorChoice::Always,
    };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();
    if TermLogger::init(level, config, TerminalMode::Stderr, color_choice).is_err() {
        eprintln!("Could not set up the logger");
    }
}

fn main() {
    let matches = app::get_app().get_matches();
    configure_output(
        matches.value_of("color").unwrap_or("auto"),
        matches.is_present("verbose"),
    );
    let result = match matches.subcommand() {
        Some(("hist", subcommand_matches)) => chart::histogram::run(subcommand_matches),
        Some(("bar", subcommand_matches)) => chart::barchart::run(subcommand_matches),
        Some(("line", subcommand_matches)) => chart::linegraph::run(subcommand_matches),
        Some(("scatter", subcommand_matches)) => chart::scatter::run(subcommand_matches),
        _ => unreachable!("Invalid subcommand"),
    };
    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}
