use std::fmt;

use yansi::Color::Blue;

use crate::bins::Bounds;
use crate::format::F64Formatter;

#[derive(Debug, Clone)]
/// Summary of a dataset, printed on top of its histogram.
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub std: f64,
    pub samples: usize,
    precision: Option<usize>, // If None, then human friendly display will be used
}

impl Stats {
    /// Summarizes a non empty slice of values.
    pub fn new(vec: &[f64], precision: Option<usize>) -> Self {
        let bounds = vec.iter().fold(Bounds::default(), |mut b, v| {
            b.update(*v);
            b
        });
        let samples = vec.len();
        let avg = vec.iter().sum::<f64>() / samples as f64;
        let var = vec.iter().map(|v| (avg - v).powi(2)).sum::<f64>() / samples as f64;
        Self {
            min: bounds.min,
            max: bounds.max,
            avg,
            std: var.sqrt(),
            samples,
            precision,
        }
    }

    pub fn formatter(&self) -> F64Formatter {
        match self.precision {
            None => F64Formatter::new_with_range(self.min..self.max),
            Some(n) => F64Formatter::new(n),
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formatter = self.formatter();
        writeln!(
            f,
            "Samples = {len}; Min = {min}; Max = {max}; Average = {avg}; STD = {std}",
            len = Blue.paint(self.samples.to_string()),
            min = Blue.paint(formatter.format(self.min)),
            max = Blue.paint(formatter.format(self.max)),
            avg = Blue.paint(formatter.format(self.avg)),
            std = Blue.paint(format!("{:.3}", self.std)),
        )
    }
}
