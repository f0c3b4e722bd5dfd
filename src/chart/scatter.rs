//! `scatter`: x/y points of a single input.

use clap::ArgMatches;

use crate::chart::{style_cycles, Common, StyleOptions};
use crate::error::{ConfigError, Result};
use crate::plot::RenderSink;
use crate::read::{parse_column, Pipeline, Record};
use crate::style::StyleCycles;

#[derive(Debug, Clone)]
pub struct ScatterConfig {
    pub x_column: usize,
    pub y_column: usize,
    pub styles: StyleCycles,
}

impl ScatterConfig {
    pub fn from_matches(matches: &ArgMatches) -> std::result::Result<ScatterConfig, ConfigError> {
        Ok(ScatterConfig {
            x_column: parse_column(matches.value_of("x-column").unwrap_or("1"))?,
            y_column: parse_column(matches.value_of("y-column").unwrap_or("2"))?,
            styles: style_cycles(
                matches,
                StyleOptions {
                    alpha: true,
                    ..Default::default()
                },
            )?,
        })
    }
}

#[derive(Default)]
struct Points {
    x: Vec<f64>,
    y: Vec<f64>,
}

struct ScatterState<'c> {
    config: &'c ScatterConfig,
    points: Points,
}

fn input_started(_state: &mut ScatterState, _input: usize) {}

fn record(state: &mut ScatterState, _input: usize, record: &Record) -> Result<()> {
    let x = record.float(state.config.x_column)?;
    let y = record.float(state.config.y_column)?;
    state.points.x.push(x);
    state.points.y.push(y);
    Ok(())
}

fn input_ended(_state: &mut ScatterState, _input: usize, _sink: &mut dyn RenderSink) -> Result<()> {
    Ok(())
}

fn finished(state: &mut ScatterState, sink: &mut dyn RenderSink) -> Result<()> {
    if state.points.x.is_empty() {
        warn!("No data to process");
        return Ok(());
    }
    let style = state.config.styles.style(0);
    sink.scatter(&state.points.x, &state.points.y, &style);
    sink.end_figure();
    Ok(())
}

fn pipeline<'c>() -> Pipeline<ScatterState<'c>> {
    Pipeline {
        on_input_started: input_started,
        on_record: record,
        on_input_ended: input_ended,
        on_finished: finished,
    }
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let common = Common::from_matches(matches, 1, Some(1))?;
    let config = ScatterConfig::from_matches(matches)?;
    let mut state = ScatterState {
        config: &config,
        points: Points::default(),
    };
    common.draw(&pipeline(), &mut state)
}
