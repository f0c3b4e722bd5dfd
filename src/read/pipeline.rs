use std::io;
use std::path::PathBuf;

use regex::Regex;

use crate::error::{ParseError, Result};
use crate::plot::RenderSink;
use crate::read::LineSource;

/// How a line is split into fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Separator {
    /// Runs of whitespace.
    Whitespace,
    /// A literal string, applied after trimming the line.
    Literal(String),
}

impl Default for Separator {
    fn default() -> Self {
        Separator::Whitespace
    }
}

impl Separator {
    pub fn new(sep: Option<&str>) -> Self {
        match sep {
            Some(s) if !s.is_empty() => Separator::Literal(s.to_string()),
            _ => Separator::Whitespace,
        }
    }

    pub fn split<'l>(&self, line: &'l str) -> Vec<&'l str> {
        match self {
            Separator::Whitespace => line.split_whitespace().collect(),
            Separator::Literal(sep) => line.trim().split(sep.as_str()).collect(),
        }
    }
}

/// One line of input, split into fields.
#[derive(Debug)]
pub struct Record<'l> {
    input: &'l str,
    line: usize,
    fields: Vec<&'l str>,
}

impl<'l> Record<'l> {
    pub fn new(input: &'l str, line: usize, fields: Vec<&'l str>) -> Self {
        Record {
            input,
            line,
            fields,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at zero-based `column`.
    pub fn field(&self, column: usize) -> std::result::Result<&'l str, ParseError> {
        self.fields
            .get(column)
            .copied()
            .ok_or_else(|| ParseError::FieldOutOfRange {
                input: self.input.to_string(),
                line: self.line,
                column: column + 1,
                available: self.fields.len(),
            })
    }

    /// Returns the field at zero-based `column` parsed as a float.
    pub fn float(&self, column: usize) -> std::result::Result<f64, ParseError> {
        let value = self.field(column)?;
        value.parse::<f64>().map_err(|_| ParseError::NotANumber {
            input: self.input.to_string(),
            line: self.line,
            column: column + 1,
            value: value.to_string(),
        })
    }
}

/// An input given in the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

impl Input {
    /// Builds the list of inputs from positional arguments, using standard
    /// input when there is none.  A single dash also means standard input.
    pub fn from_args<'a, I: IntoIterator<Item = &'a str>>(args: I) -> Vec<Input> {
        let mut inputs: Vec<Input> = args
            .into_iter()
            .map(|arg| match arg {
                "-" => Input::Stdin,
                path => Input::Path(PathBuf::from(path)),
            })
            .collect();
        if inputs.is_empty() {
            inputs.push(Input::Stdin);
        }
        inputs
    }
}

/// The steps a chart plugs into the record loop.
///
/// Every input is processed in order: `on_input_started`, then `on_record`
/// for every record, then `on_input_ended`.  `on_finished` runs once, after
/// the last input.
pub struct Pipeline<S> {
    pub on_input_started: fn(&mut S, usize),
    pub on_record: fn(&mut S, usize, &Record) -> Result<()>,
    pub on_input_ended: fn(&mut S, usize, &mut dyn RenderSink) -> Result<()>,
    pub on_finished: fn(&mut S, &mut dyn RenderSink) -> Result<()>,
}

/// Reads lines from sources and hands records to a `Pipeline`.
#[derive(Debug, Default, Builder)]
pub struct RecordReader {
    #[builder(default)]
    separator: Separator,
    #[builder(setter(strip_option), default)]
    filter: Option<Regex>,
}

impl RecordReader {
    /// Runs `pipeline` over every input, in order.
    pub fn run<S>(
        &self,
        pipeline: &Pipeline<S>,
        state: &mut S,
        inputs: &[Input],
        sink: &mut dyn RenderSink,
    ) -> Result<()> {
        for (index, input) in inputs.iter().enumerate() {
            match input {
                Input::Stdin => {
                    let stdin = io::stdin();
                    let mut handle = stdin.lock();
                    let mut source = LineSource::from_reader("<stdin>", &mut handle);
                    self.process(pipeline, state, index, &mut source, sink)?;
                }
                Input::Path(path) => {
                    let mut source = LineSource::open(path)?;
                    self.process(pipeline, state, index, &mut source, sink)?;
                }
            }
        }
        (pipeline.on_finished)(state, sink)
    }

    /// Processes a single input as the `index`-th one.
    pub fn process<S>(
        &self,
        pipeline: &Pipeline<S>,
        state: &mut S,
        index: usize,
        source: &mut LineSource,
        sink: &mut dyn RenderSink,
    ) -> Result<()> {
        (pipeline.on_input_started)(state, index);
        let records = self.feed(pipeline, state, index, source);
        source.release();
        let records = records?;
        debug!("Read {} records from {}", records, source.name());
        (pipeline.on_input_ended)(state, index, sink)
    }

    fn feed<S>(
        &self,
        pipeline: &Pipeline<S>,
        state: &mut S,
        index: usize,
        source: &mut LineSource,
    ) -> Result<usize> {
        let name = source.name().to_string();
        let mut records = 0;
        loop {
            let line_no = source.line_no() + 1;
            let line = match source.next_line()? {
                Some(line) => line,
                None => break,
            };
            if let Some(re) = &self.filter {
                if !re.is_match(line) {
                    debug!("Regex does not match '{}'", line);
                    continue;
                }
            }
            let record = Record::new(&name, line_no, self.separator.split(line));
            (pipeline.on_record)(state, index, &record)?;
            records += 1;
        }
        Ok(records)
    }
}
