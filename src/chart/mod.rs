//! Chart drivers.
//!
//! Every chart validates its whole configuration from the command line,
//! plugs its own steps into a [`Pipeline`](crate::read::Pipeline) and lets
//! the record reader drive it over all inputs.

use std::str::FromStr;

use clap::ArgMatches;

use crate::config::{self, OutputOptions};
use crate::error::{ConfigError, Result};
use crate::plot::TermSink;
use crate::read::{Input, Pipeline, RecordReader};
use crate::style::{labels, parse_colours, parse_floats, Colour, Cycle, StyleCycles};

pub mod barchart;
pub mod histogram;
pub mod linegraph;
pub mod scatter;

/// Options every chart reads before looking at its own ones.
pub struct Common {
    pub output: OutputOptions,
    pub reader: RecordReader,
    pub inputs: Vec<Input>,
}

impl Common {
    /// Validates the shared options and the number of inputs, which must be
    /// at least `min` and at most `max` (if any).
    pub fn from_matches(
        matches: &ArgMatches,
        min: usize,
        max: Option<usize>,
    ) -> std::result::Result<Common, ConfigError> {
        Ok(Common {
            output: OutputOptions::from_matches(matches)?,
            reader: config::record_reader(matches)?,
            inputs: config::inputs(matches, min, max)?,
        })
    }

    /// Runs `pipeline` over all inputs and draws whatever it produced.
    pub fn draw<S>(self, pipeline: &Pipeline<S>, state: &mut S) -> Result<()> {
        let mut sink = TermSink::new(self.output);
        self.reader.run(pipeline, state, &self.inputs, &mut sink)?;
        sink.finish()
    }
}

/// Which style options a chart understands.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleOptions {
    pub alpha: bool,
    pub error_colours: bool,
}

/// Builds the style cycles from the colour, alpha, marker, legend and error
/// colour options.
pub fn style_cycles(
    matches: &ArgMatches,
    which: StyleOptions,
) -> std::result::Result<StyleCycles, ConfigError> {
    let mut cycles = StyleCycles::default();
    if let Some(colours) = matches.value_of("colours") {
        cycles.colours = parse_colours("colours", colours)?;
    }
    if which.alpha {
        if let Some(alpha) = matches.value_of("alpha") {
            cycles.alphas = parse_floats("alpha", alpha)?;
        }
    }
    if let Some(markers) = matches.value_of("markers") {
        cycles.markers = Cycle::chars("markers", markers)?;
    }
    cycles.labels = labels("legends", matches.values_of("legends"))?;
    if which.error_colours {
        if let Some(colours) = matches.value_of("e-colours") {
            cycles.error_colours =
                Cycle::parse("e-colours", colours, ',', |s| Colour::from_str(s).map(Some))?;
        }
    }
    Ok(cycles)
}
