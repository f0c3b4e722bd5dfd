//! `hist`: histograms of one or more columns of every input.

use clap::ArgMatches;

use crate::aggregate::{Accumulator, Mode};
use crate::bins::{BinOptions, BinRequest};
use crate::chart::{style_cycles, Common, StyleOptions};
use crate::config::parse_value;
use crate::error::{ConfigError, Result};
use crate::plot::{HistogramOptions, RenderSink};
use crate::read::{parse_columns, Pipeline, Record};
use crate::style::{Cycle, HistType, StyleCycles};

/// Everything `hist` needs to know before reading data.
#[derive(Debug, Clone)]
pub struct HistConfig {
    pub columns: Vec<usize>,
    pub bins: BinOptions,
    pub unify: bool,
    pub styles: StyleCycles,
    pub hist_types: Cycle<HistType>,
    pub options: HistogramOptions,
}

impl HistConfig {
    pub fn from_matches(
        matches: &ArgMatches,
        common: &Common,
    ) -> std::result::Result<HistConfig, ConfigError> {
        let columns = parse_columns(Some(matches.value_of("field").unwrap_or("1")))?;
        let request = BinRequest::new(
            parse_value(matches, "bins")?,
            parse_value(matches, "bin-size")?,
        )?;
        let hist_types = Cycle::parse(
            "hist-type",
            matches.value_of("hist-type").unwrap_or("bar"),
            ',',
            |s| s.parse::<HistType>(),
        )?;
        Ok(HistConfig {
            columns,
            bins: BinOptions {
                request,
                disable_offset: matches.is_present("disable-bin-offset"),
                display: common.output.display_x,
            },
            unify: matches.is_present("unify-bins"),
            styles: style_cycles(
                matches,
                StyleOptions {
                    alpha: true,
                    ..Default::default()
                },
            )?,
            hist_types,
            options: HistogramOptions {
                normed: matches.is_present("normed"),
                cumulative: matches.is_present("cumulative"),
                log: matches.is_present("logscale"),
                precision: common.output.precision,
                display: common.output.display_x,
            },
        })
    }
}

struct HistState<'c> {
    config: &'c HistConfig,
    acc: Accumulator,
    // Datasets seen so far, drawn or not; picks the style of the next one
    seen: usize,
}

impl<'c> HistState<'c> {
    fn new(config: &'c HistConfig) -> Self {
        let mode = if config.unify {
            Mode::Unified
        } else {
            Mode::PerInput
        };
        HistState {
            config,
            acc: Accumulator::new(config.columns.clone(), mode),
            seen: 0,
        }
    }

    /// Bins every non empty dataset and hands it to the sink.  With `shared`
    /// bins, all datasets are binned over the range of all of them.
    fn dispatch(&mut self, sink: &mut dyn RenderSink, shared: bool) -> Result<()> {
        let global = self.acc.bounds();
        for (index, dataset) in self.acc.datasets().iter().enumerate() {
            let slot = self.seen;
            self.seen += 1;
            if dataset.is_empty() {
                warn!("No data to process for dataset {}", index);
                continue;
            }
            let bounds = if shared { global } else { dataset.bounds() };
            let bins = self.config.bins.bins(bounds, shared)?;
            debug!("Dataset {} has {} values, bins {:?}", index, dataset.len(), bins);
            let style = self.config.styles.style(slot);
            let hist_type = *self.config.hist_types.get(slot);
            sink.histogram(dataset.values(), &bins, &style, hist_type, self.config.options);
        }
        sink.end_figure();
        Ok(())
    }
}

fn input_started(state: &mut HistState, input: usize) {
    state.acc.start_input(input);
}

fn record(state: &mut HistState, input: usize, record: &Record) -> Result<()> {
    state.acc.add(input, record)
}

fn input_ended(state: &mut HistState, _input: usize, sink: &mut dyn RenderSink) -> Result<()> {
    match state.acc.mode() {
        Mode::PerInput => state.dispatch(sink, false),
        Mode::Unified => Ok(()),
    }
}

fn finished(state: &mut HistState, sink: &mut dyn RenderSink) -> Result<()> {
    match state.acc.mode() {
        Mode::PerInput => Ok(()),
        Mode::Unified => state.dispatch(sink, true),
    }
}

fn pipeline<'c>() -> Pipeline<HistState<'c>> {
    Pipeline {
        on_input_started: input_started,
        on_record: record,
        on_input_ended: input_ended,
        on_finished: finished,
    }
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let common = Common::from_matches(matches, 1, None)?;
    let config = HistConfig::from_matches(matches, &common)?;
    let mut state = HistState::new(&config);
    common.draw(&pipeline(), &mut state)
}
