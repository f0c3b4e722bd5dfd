//! `bar`: one bar per category and dataset, optionally with error bars.

use std::collections::HashMap;

use clap::ArgMatches;

use crate::chart::{style_cycles, Common, StyleOptions};
use crate::error::{ConfigError, Result};
use crate::plot::RenderSink;
use crate::read::{parse_column, parse_columns, Pipeline, Record};
use crate::style::StyleCycles;

/// Everything `bar` needs to know before reading data.
#[derive(Debug, Clone)]
pub struct BarConfig {
    pub category: usize,
    pub columns: Vec<usize>,
    pub error_columns: Vec<usize>,
    pub styles: StyleCycles,
    pub logscale: bool,
}

impl BarConfig {
    pub fn from_matches(matches: &ArgMatches) -> std::result::Result<BarConfig, ConfigError> {
        let category = parse_column(matches.value_of("cat-field").unwrap_or("1"))?;
        let columns = parse_columns(Some(matches.value_of("field").unwrap_or("2")))?;
        let error_columns = parse_columns(matches.value_of("error-field"))?;
        if !error_columns.is_empty() && error_columns.len() != columns.len() {
            return Err(ConfigError::ErrorColumnsMismatch {
                fields: columns.len(),
                errors: error_columns.len(),
            });
        }
        Ok(BarConfig {
            category,
            columns,
            error_columns,
            styles: style_cycles(
                matches,
                StyleOptions {
                    alpha: true,
                    error_colours: true,
                },
            )?,
            logscale: matches.is_present("logscale"),
        })
    }
}

/// Values (or errors) of a dataset, indexed by category.
#[derive(Debug, Default, Clone)]
struct Column(Vec<f64>);

impl Column {
    fn set(&mut self, category: usize, value: f64) {
        if self.0.len() <= category {
            self.0.resize(category + 1, 0.0);
        }
        self.0[category] = value;
    }

    fn padded(&self, len: usize) -> Vec<f64> {
        let mut values = self.0.clone();
        values.resize(len, 0.0);
        values
    }
}

struct BarState<'c> {
    config: &'c BarConfig,
    categories: Vec<String>,
    category_index: HashMap<String, usize>,
    data: Vec<Column>,
    errors: Vec<Column>,
}

impl<'c> BarState<'c> {
    fn new(config: &'c BarConfig) -> Self {
        BarState {
            config,
            categories: Vec::new(),
            category_index: HashMap::new(),
            data: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn category(&mut self, name: &str) -> usize {
        if let Some(index) = self.category_index.get(name) {
            return *index;
        }
        let index = self.categories.len();
        self.categories.push(name.to_string());
        self.category_index.insert(name.to_string(), index);
        index
    }
}

fn input_started(state: &mut BarState, _input: usize) {
    let total = state.data.len() + state.config.columns.len();
    state.data.resize_with(total, Column::default);
    state.errors.resize_with(total, Column::default);
}

fn record(state: &mut BarState, input: usize, record: &Record) -> Result<()> {
    let config = state.config;
    let name = record.field(config.category)?;
    let mut values = Vec::with_capacity(config.columns.len());
    for column in config.columns.iter() {
        values.push(record.float(*column)?);
    }
    let mut errors = Vec::with_capacity(config.error_columns.len());
    for column in config.error_columns.iter() {
        errors.push(record.float(*column)?);
    }
    let category = state.category(name);
    let fields = config.columns.len();
    for (offset, value) in values.into_iter().enumerate() {
        state.data[input * fields + offset].set(category, value);
    }
    for (offset, error) in errors.into_iter().enumerate() {
        state.errors[input * fields + offset].set(category, error);
    }
    Ok(())
}

fn input_ended(_state: &mut BarState, _input: usize, _sink: &mut dyn RenderSink) -> Result<()> {
    Ok(())
}

fn finished(state: &mut BarState, sink: &mut dyn RenderSink) -> Result<()> {
    let len = state.categories.len();
    if len == 0 {
        warn!("No data to process");
        return Ok(());
    }
    let with_errors = !state.config.error_columns.is_empty();
    for (index, column) in state.data.iter().enumerate() {
        let errors = if with_errors {
            Some(state.errors[index].padded(len))
        } else {
            None
        };
        sink.bars(
            &state.categories,
            &column.padded(len),
            errors.as_deref(),
            &state.config.styles.style(index),
            state.config.logscale,
        );
    }
    sink.end_figure();
    Ok(())
}

fn pipeline<'c>() -> Pipeline<BarState<'c>> {
    Pipeline {
        on_input_started: input_started,
        on_record: record,
        on_input_ended: input_ended,
        on_finished: finished,
    }
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let common = Common::from_matches(matches, 1, None)?;
    let config = BarConfig::from_matches(matches)?;
    let mut state = BarState::new(&config);
    common.draw(&pipeline(), &mut state)
}
