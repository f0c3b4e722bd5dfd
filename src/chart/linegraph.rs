//! `line`: one line per y column, one figure per input.

use clap::ArgMatches;

use crate::chart::{style_cycles, Common, StyleOptions};
use crate::error::{ConfigError, Result};
use crate::plot::{Axis, RenderSink};
use crate::read::{parse_column, parse_columns, Pipeline, Record};
use crate::style::{Cycle, StyleCycles};

#[derive(Debug, Clone)]
pub struct LineConfig {
    pub x_column: usize,
    pub y_columns: Vec<usize>,
    pub axes: Cycle<Axis>,
    pub styles: StyleCycles,
}

impl LineConfig {
    pub fn from_matches(matches: &ArgMatches) -> std::result::Result<LineConfig, ConfigError> {
        Ok(LineConfig {
            x_column: parse_column(matches.value_of("x-column").unwrap_or("1"))?,
            y_columns: parse_columns(Some(matches.value_of("y-column").unwrap_or("2")))?,
            axes: Cycle::parse(
                "axes",
                matches.value_of("axes").unwrap_or("1"),
                ',',
                |s| s.parse::<Axis>(),
            )?,
            styles: style_cycles(matches, StyleOptions::default())?,
        })
    }
}

struct LineState<'c> {
    config: &'c LineConfig,
    x: Vec<f64>,
    y: Vec<Vec<f64>>,
    // Series seen so far, drawn or not
    seen: usize,
}

fn input_started(state: &mut LineState, _input: usize) {
    state.x.clear();
    state.y = vec![Vec::new(); state.config.y_columns.len()];
}

fn record(state: &mut LineState, _input: usize, record: &Record) -> Result<()> {
    let x = record.float(state.config.x_column)?;
    let mut ys = Vec::with_capacity(state.y.len());
    for column in state.config.y_columns.iter() {
        ys.push(record.float(*column)?);
    }
    state.x.push(x);
    for (series, y) in state.y.iter_mut().zip(ys) {
        series.push(y);
    }
    Ok(())
}

fn input_ended(state: &mut LineState, input: usize, sink: &mut dyn RenderSink) -> Result<()> {
    if state.x.is_empty() {
        warn!("No data to process in input {}", input);
        state.seen += state.y.len();
        return Ok(());
    }
    for series in state.y.iter() {
        let axis = *state.config.axes.get(state.seen);
        let style = state.config.styles.style(state.seen);
        sink.line(&state.x, series, axis, &style);
        state.seen += 1;
    }
    sink.end_figure();
    Ok(())
}

fn finished(_state: &mut LineState, _sink: &mut dyn RenderSink) -> Result<()> {
    Ok(())
}

fn pipeline<'c>() -> Pipeline<LineState<'c>> {
    Pipeline {
        on_input_started: input_started,
        on_record: record,
        on_input_ended: input_ended,
        on_finished: finished,
    }
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let common = Common::from_matches(matches, 1, None)?;
    let config = LineConfig::from_matches(matches)?;
    let mut state = LineState {
        config: &config,
        x: Vec::new(),
        y: Vec::new(),
        seen: 0,
    };
    common.draw(&pipeline(), &mut state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::tests::sub_matches;
    use crate::plot::{Call, RecordingSink};
    use crate::read::{LineSource, RecordReader};
    use crate::style::Colour;
    use std::io::Cursor;

    fn feed(config: &LineConfig, inputs: &[&str]) -> Vec<Call> {
        let reader = RecordReader::default();
        let mut state = LineState {
            config,
            x: Vec::new(),
            y: Vec::new(),
            seen: 0,
        };
        let mut sink = RecordingSink::default();
        for (index, data) in inputs.iter().enumerate() {
            let mut cursor = Cursor::new(data.as_bytes());
            let mut source = LineSource::from_reader("<test>", &mut cursor);
            reader
                .process(&pipeline(), &mut state, index, &mut source, &mut sink)
                .unwrap();
        }
        sink.calls
    }

    #[test]
    fn defaults() {
        let config = LineConfig::from_matches(&sub_matches("line", &[])).unwrap();
        assert_eq!(config.x_column, 0);
        assert_eq!(config.y_columns, [1]);
        assert_eq!(*config.axes.get(5), Axis::Primary);
    }

    #[test]
    fn bad_axes() {
        let m = sub_matches("line", &["-a", "1,3"]);
        assert!(matches!(
            LineConfig::from_matches(&m),
            Err(ConfigError::StyleValue { .. })
        ));
    }

    #[test]
    fn one_figure_per_input() {
        let m = sub_matches("line", &["-y", "2-3", "-a", "1,2", "-c", "b,g,r"]);
        let config = LineConfig::from_matches(&m).unwrap();
        let calls = feed(&config, &["1 10 100\n2 20 200\n", "3 30 300\n"]);
        assert_eq!(calls.len(), 6);
        assert_eq!(
            calls[0],
            Call::Line {
                x: vec![1.0, 2.0],
                y: vec![10.0, 20.0],
                axis: Axis::Primary,
                style: config.styles.style(0),
            }
        );
        match &calls[1] {
            Call::Line { y, axis, style, .. } => {
                assert_eq!(y, &[100.0, 200.0]);
                assert_eq!(*axis, Axis::Secondary);
                assert_eq!(style.colour, Colour::Green);
            }
            other => panic!("Expected a line, got {:?}", other),
        }
        assert_eq!(calls[2], Call::EndFigure);
        match &calls[3] {
            Call::Line { x, axis, style, .. } => {
                assert_eq!(x, &[3.0]);
                assert_eq!(*axis, Axis::Primary);
                assert_eq!(style.colour, Colour::Red);
            }
            other => panic!("Expected a line, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_draws_nothing() {
        let config = LineConfig::from_matches(&sub_matches("line", &[])).unwrap();
        assert!(feed(&config, &[""]).is_empty());
    }

    #[test]
    fn empty_input_keeps_its_colour() {
        let m = sub_matches("line", &["-c", "b,g"]);
        let config = LineConfig::from_matches(&m).unwrap();
        let calls = feed(&config, &["", "1 2\n"]);
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::Line { style, .. } => assert_eq!(style.colour, Colour::Green),
            other => panic!("Expected a line, got {:?}", other),
        }
    }
}
