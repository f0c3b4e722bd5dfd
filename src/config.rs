//! Options shared by every chart, validated up front so that bad command
//! lines are rejected before any input is opened.

use std::str::FromStr;

use clap::ArgMatches;
use regex::Regex;

use crate::bins::DisplayRange;
use crate::error::ConfigError;
use crate::read::{Input, RecordReader, RecordReaderBuilder, Separator};

/// Formats a chart can be saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// Plain text, no colours.
    Txt,
    /// Text with ANSI colour sequences.
    Ansi,
}

impl SaveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Txt => "txt",
            SaveFormat::Ansi => "ansi",
        }
    }
}

impl FromStr for SaveFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "txt" => Ok(SaveFormat::Txt),
            "ansi" => Ok(SaveFormat::Ansi),
            other => Err(ConfigError::SaveFormat(other.to_string())),
        }
    }
}

/// How and where charts are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputOptions {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub width: usize,
    pub height: usize,
    pub precision: Option<usize>,
    pub display_x: DisplayRange,
    pub display_y: DisplayRange,
    pub quiet: bool,
    pub save: Option<String>,
    pub save_formats: Vec<SaveFormat>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            title: None,
            x_label: None,
            y_label: None,
            width: 110,
            height: 20,
            precision: None,
            display_x: DisplayRange::default(),
            display_y: DisplayRange::default(),
            quiet: false,
            save: None,
            save_formats: vec![SaveFormat::Txt],
        }
    }
}

impl OutputOptions {
    pub fn from_matches(matches: &ArgMatches) -> Result<OutputOptions, ConfigError> {
        let defaults = OutputOptions::default();
        let quiet = matches.is_present("quiet");
        let save = matches.value_of("save").map(String::from);
        if quiet && save.is_none() {
            return Err(ConfigError::QuietWithoutSave);
        }
        let save_formats = match matches.value_of("save-formats") {
            Some(formats) => formats
                .split(',')
                .map(SaveFormat::from_str)
                .collect::<Result<Vec<SaveFormat>, ConfigError>>()?,
            None => defaults.save_formats,
        };
        Ok(OutputOptions {
            title: matches.value_of("title").map(String::from),
            x_label: matches.value_of("x-label").map(String::from),
            y_label: matches.value_of("y-label").map(String::from),
            width: parse_value(matches, "width")?.unwrap_or(defaults.width),
            height: parse_value(matches, "height")?.unwrap_or(defaults.height),
            precision: parse_value(matches, "precision")?,
            display_x: display_range(matches, "min-x", "max-x", "x")?,
            display_y: display_range(matches, "min-y", "max-y", "y")?,
            quiet,
            save,
            save_formats,
        })
    }
}

/// Parses an optional option value, failing on values that do not convert.
pub fn parse_value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, ConfigError> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                option: name.to_string(),
                value: value.to_string(),
            }),
    }
}

fn display_range(
    matches: &ArgMatches,
    min: &str,
    max: &str,
    axis: &'static str,
) -> Result<DisplayRange, ConfigError> {
    let range = DisplayRange {
        min: parse_value(matches, min)?,
        max: parse_value(matches, max)?,
    };
    if let (Some(min), Some(max)) = (range.min, range.max) {
        if min >= max {
            return Err(ConfigError::InvalidRange(axis));
        }
    }
    Ok(range)
}

/// Builds the record reader from the separator and filter options.
pub fn record_reader(matches: &ArgMatches) -> Result<RecordReader, ConfigError> {
    let mut builder = RecordReaderBuilder::default();
    builder.separator(Separator::new(matches.value_of("separator")));
    if let Some(string) = matches.value_of("filter") {
        match Regex::new(string) {
            Ok(re) => {
                builder.filter(re);
            }
            Err(_) => return Err(ConfigError::Regex(string.to_string())),
        }
    }
    builder.build().map_err(|e| ConfigError::InvalidValue {
        option: String::from("separator"),
        value: e.to_string(),
    })
}

/// The inputs of a chart, checked against the number of inputs it accepts.
pub fn inputs(
    matches: &ArgMatches,
    min: usize,
    max: Option<usize>,
) -> Result<Vec<Input>, ConfigError> {
    let inputs = Input::from_args(matches.values_of("input").into_iter().flatten());
    let got = inputs.len();
    if got < min || max.map_or(false, |max| got > max) {
        return Err(ConfigError::InputCount {
            min,
            max: max.map_or_else(|| String::from("unlimited"), |m| m.to_string()),
            got,
        });
    }
    Ok(inputs)
}
