//! Style attributes (colours, alphas, markers, labels) and the cycles that
//! hand them out to datasets in round-robin order.

use std::fmt::Display;
use std::str::FromStr;

use yansi::{Color, Paint};

use crate::error::ConfigError;

/// An endless round-robin over a fixed, non empty list of values.
///
/// Draw `i` is `values[i % len]`, so a cycle can be restarted by just using
/// a new counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle<T> {
    values: Vec<T>,
}

impl<T> Cycle<T> {
    pub fn new(option: &str, values: Vec<T>) -> Result<Self, ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::EmptyCycle(option.to_string()));
        }
        Ok(Cycle { values })
    }

    /// Splits `arg` by `sep` and converts every piece with `f`.  Fails if any
    /// of the pieces cannot be converted.
    pub fn parse<F, E>(option: &str, arg: &str, sep: char, f: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: Display,
    {
        let values = arg
            .split(sep)
            .map(|piece| {
                f(piece).map_err(|e| ConfigError::StyleValue {
                    option: option.to_string(),
                    value: piece.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<T>, ConfigError>>()?;
        Cycle::new(option, values)
    }

    pub fn get(&self, i: usize) -> &T {
        &self.values[i % self.values.len()]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter().cycle()
    }
}

impl Cycle<char> {
    /// A cycle over every character of `arg`.
    pub fn chars(option: &str, arg: &str) -> Result<Self, ConfigError> {
        Cycle::new(option, arg.chars().collect())
    }
}

/// Colours understood in style options, by single letter or by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Colour {
    Red,
    Green,
    Blue,
    Cyan,
    Yellow,
    Magenta,
    Black,
    White,
}

impl FromStr for Colour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Colour::Red),
            "g" | "green" => Ok(Colour::Green),
            "b" | "blue" => Ok(Colour::Blue),
            "c" | "cyan" => Ok(Colour::Cyan),
            "y" | "yellow" => Ok(Colour::Yellow),
            "m" | "magenta" => Ok(Colour::Magenta),
            "k" | "black" => Ok(Colour::Black),
            "w" | "white" => Ok(Colour::White),
            other => Err(format!("unknown colour '{}'", other)),
        }
    }
}

impl From<Colour> for Color {
    fn from(colour: Colour) -> Color {
        match colour {
            Colour::Red => Color::Red,
            Colour::Green => Color::Green,
            Colour::Blue => Color::Blue,
            Colour::Cyan => Color::Cyan,
            Colour::Yellow => Color::Yellow,
            Colour::Magenta => Color::Magenta,
            Colour::Black => Color::Black,
            Colour::White => Color::White,
        }
    }
}

/// How histogram buckets are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistType {
    Bar,
    BarStacked,
    Step,
    StepFilled,
}

impl FromStr for HistType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bar" => Ok(HistType::Bar),
            "barstacked" => Ok(HistType::BarStacked),
            "step" => Ok(HistType::Step),
            "stepfilled" => Ok(HistType::StepFilled),
            other => Err(format!("unknown histogram type '{}'", other)),
        }
    }
}

/// The attributes used to draw one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub colour: Colour,
    pub alpha: f64,
    pub marker: Option<char>,
    pub label: Option<String>,
    pub error_colour: Option<Colour>,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            colour: Colour::Red,
            alpha: 1.0,
            marker: None,
            label: None,
            error_colour: None,
        }
    }
}

impl Style {
    /// Paints `s` with this style.  Transparent styles (alpha under 0.5) are
    /// dimmed.
    pub fn paint<T>(&self, s: T) -> Paint<T> {
        let paint = Paint::new(s).fg(self.colour.into());
        if self.alpha < 0.5 {
            paint.dimmed()
        } else {
            paint
        }
    }

    /// Paints `s` with the error colour, or with the main colour if there is
    /// none.
    pub fn paint_error<T>(&self, s: T) -> Paint<T> {
        Paint::new(s).fg(self.error_colour.unwrap_or(self.colour).into())
    }

    /// The marker, or `default` if the marker is missing or blank.
    pub fn glyph(&self, default: char) -> char {
        match self.marker {
            Some(c) if !c.is_whitespace() => c,
            _ => default,
        }
    }
}

/// The style cycles of a chart.  Style `i` takes the `i`-th draw of every
/// cycle, so attributes stay in step across datasets.
#[derive(Debug, Clone)]
pub struct StyleCycles {
    pub colours: Cycle<Colour>,
    pub alphas: Cycle<f64>,
    pub markers: Cycle<char>,
    pub labels: Cycle<Option<String>>,
    pub error_colours: Cycle<Option<Colour>>,
}

impl Default for StyleCycles {
    fn default() -> Self {
        StyleCycles {
            colours: Cycle {
                values: vec![Colour::Red],
            },
            alphas: Cycle { values: vec![1.0] },
            markers: Cycle { values: vec![' '] },
            labels: Cycle { values: vec![None] },
            error_colours: Cycle { values: vec![None] },
        }
    }
}

impl StyleCycles {
    pub fn style(&self, i: usize) -> Style {
        let marker = *self.markers.get(i);
        Style {
            colour: *self.colours.get(i),
            alpha: *self.alphas.get(i),
            marker: if marker.is_whitespace() {
                None
            } else {
                Some(marker)
            },
            label: self.labels.get(i).clone(),
            error_colour: *self.error_colours.get(i),
        }
    }
}

/// Parses a comma separated colour list.
pub fn parse_colours(option: &str, arg: &str) -> Result<Cycle<Colour>, ConfigError> {
    Cycle::parse(option, arg, ',', Colour::from_str)
}

/// Parses a comma separated float list.
pub fn parse_floats(option: &str, arg: &str) -> Result<Cycle<f64>, ConfigError> {
    Cycle::parse(option, arg, ',', |s| s.trim().parse::<f64>())
}

/// Labels for datasets, or a cycle of `None` when there are no labels.
pub fn labels<'a, I: IntoIterator<Item = &'a str>>(
    option: &str,
    values: Option<I>,
) -> Result<Cycle<Option<String>>, ConfigError> {
    match values {
        Some(values) => Cycle::new(
            option,
            values.into_iter().map(|s| Some(s.to_string())).collect(),
        ),
        None => Cycle::new(option, vec![None]),
    }
}
