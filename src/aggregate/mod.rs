//! Accumulation of column values into datasets, one dataset per requested
//! column and (when inputs are kept apart) per input.

use crate::bins::Bounds;
use crate::error::Result;
use crate::read::Record;

/// The values of one column of one input, in input order, along with their
/// running bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
    bounds: Bounds,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.bounds.update(value);
        self.values.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How datasets of different inputs relate to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Every input reuses datasets `0..fields`, which are cleared when the
    /// input starts.
    PerInput,
    /// Input `i` owns datasets `i * fields .. (i + 1) * fields` and nothing is
    /// cleared, so all inputs can be looked at once they have all been read.
    Unified,
}

/// Collects the values of a list of columns into datasets.
#[derive(Debug, Clone)]
pub struct Accumulator {
    columns: Vec<usize>,
    mode: Mode,
    datasets: Vec<Dataset>,
}

impl Accumulator {
    pub fn new(columns: Vec<usize>, mode: Mode) -> Self {
        Accumulator {
            columns,
            mode,
            datasets: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fields_per_input(&self) -> usize {
        self.columns.len()
    }

    /// Index of the dataset fed by column number `offset` of input `input`.
    pub fn dataset_index(&self, input: usize, offset: usize) -> usize {
        match self.mode {
            Mode::PerInput => offset,
            Mode::Unified => input * self.columns.len() + offset,
        }
    }

    /// Makes room for the datasets of a new input.
    pub fn start_input(&mut self, _input: usize) {
        if self.mode == Mode::PerInput {
            self.datasets.clear();
        }
        let fields = self.columns.len();
        self.datasets
            .extend(std::iter::repeat_with(Dataset::new).take(fields));
    }

    /// Adds the values of a record.  Any missing or non numeric column fails
    /// the whole record.
    pub fn add(&mut self, input: usize, record: &Record) -> Result<()> {
        let values = self
            .columns
            .iter()
            .map(|&column| record.float(column))
            .collect::<std::result::Result<Vec<f64>, _>>()?;
        for (offset, value) in values.into_iter().enumerate() {
            let index = self.dataset_index(input, offset);
            self.datasets[index].push(value);
        }
        Ok(())
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Bounds of all datasets together.
    pub fn bounds(&self) -> Bounds {
        self.datasets
            .iter()
            .fold(Bounds::default(), |acc, d| acc.merge(&d.bounds()))
    }
}
