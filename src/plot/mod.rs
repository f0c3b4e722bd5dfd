//! Chart rendering.
//!
//! Chart drivers hand their datasets to a [`RenderSink`].  The only sink
//! shipped here, [`TermSink`], draws low resolution charts as text and only
//! writes them (to stdout and to the save files) once the whole run succeeded.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use yansi::Paint;

use crate::bins::BinSpec;
use crate::config::{OutputOptions, SaveFormat};
use crate::error::{Error, Result};
use crate::format::write_header;
use crate::style::{HistType, Style};

pub use self::barchart::{BarChart, BarSeries};
pub use self::histogram::{Histogram, HistogramOptions};
pub use self::xy::{XyPlot, XySeries};

mod barchart;
mod histogram;
mod xy;

/// The y axis a line series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Primary,
    Secondary,
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Axis::Primary),
            "2" => Ok(Axis::Secondary),
            other => Err(format!("axis must be 1 or 2, not '{}'", other)),
        }
    }
}

/// Receives datasets, already binned where it applies, together with the
/// style they must be drawn with.
///
/// Calls between two `end_figure` calls belong to the same figure.
pub trait RenderSink {
    fn histogram(
        &mut self,
        values: &[f64],
        bins: &BinSpec,
        style: &Style,
        hist_type: HistType,
        options: HistogramOptions,
    );
    fn bars(
        &mut self,
        categories: &[String],
        values: &[f64],
        errors: Option<&[f64]>,
        style: &Style,
        logscale: bool,
    );
    fn line(&mut self, x: &[f64], y: &[f64], axis: Axis, style: &Style);
    fn scatter(&mut self, x: &[f64], y: &[f64], style: &Style);
    fn end_figure(&mut self);
}

#[derive(Debug)]
enum Panel {
    Histogram(Histogram),
    Bars(BarChart),
    Xy(Axis, XyPlot),
}

#[derive(Debug)]
struct Figure {
    panels: Vec<Panel>,
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    width: usize,
}

impl Figure {
    fn xy(&mut self, axis: Axis, options: &OutputOptions) -> &mut XyPlot {
        let found = self
            .panels
            .iter()
            .position(|p| matches!(p, Panel::Xy(a, _) if *a == axis));
        let index = match found {
            Some(index) => index,
            None => {
                let y_range = match axis {
                    Axis::Primary => options.display_y,
                    Axis::Secondary => Default::default(),
                };
                self.panels.push(Panel::Xy(
                    axis,
                    XyPlot::new(
                        options.width,
                        options.height,
                        options.display_x,
                        y_range,
                        options.precision,
                    ),
                ));
                self.panels.len() - 1
            }
        };
        match &mut self.panels[index] {
            Panel::Xy(_, plot) => plot,
            _ => unreachable!("Panel is not a xy plot"),
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self.width;
        write_header(f, "Title", self.title.as_deref().unwrap_or(""))?;
        write_header(f, "x axis", self.x_label.as_deref().unwrap_or(""))?;
        write_header(f, "y axis", self.y_label.as_deref().unwrap_or(""))?;
        for panel in self.panels.iter() {
            match panel {
                Panel::Histogram(hist) => write!(f, "{:width$}", hist, width = width)?,
                Panel::Bars(chart) => write!(f, "{:width$}", chart, width = width)?,
                Panel::Xy(Axis::Primary, plot) => write!(f, "{:width$}", plot, width = width)?,
                Panel::Xy(Axis::Secondary, plot) => {
                    writeln!(f, "Secondary axis")?;
                    write!(f, "{:width$}", plot, width = width)?
                }
            }
        }
        Ok(())
    }
}

/// Draws charts as text in a terminal.
#[derive(Debug)]
pub struct TermSink {
    options: OutputOptions,
    figures: Vec<Figure>,
    open: bool,
}

impl TermSink {
    pub fn new(options: OutputOptions) -> TermSink {
        TermSink {
            options,
            figures: Vec::new(),
            open: false,
        }
    }

    fn figure(&mut self) -> &mut Figure {
        if !self.open {
            self.figures.push(Figure {
                panels: Vec::new(),
                title: self.options.title.clone(),
                x_label: self.options.x_label.clone(),
                y_label: self.options.y_label.clone(),
                width: self.options.width,
            });
            self.open = true;
        }
        let last = self.figures.len() - 1;
        &mut self.figures[last]
    }

    /// Number of figures drawn so far.
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// All figures, one after the other, with colours as currently enabled.
    pub fn render(&self) -> String {
        self.figures
            .iter()
            .map(|figure| figure.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn render_as(&self, format: SaveFormat) -> String {
        let enabled = Paint::is_enabled();
        match format {
            SaveFormat::Txt => Paint::disable(),
            SaveFormat::Ansi => Paint::enable(),
        }
        let text = self.render();
        if enabled {
            Paint::enable();
        } else {
            Paint::disable();
        }
        text
    }

    /// Paths the figures will be saved to.
    pub fn save_paths(&self) -> Vec<(SaveFormat, PathBuf)> {
        match &self.options.save {
            None => Vec::new(),
            Some(basename) => self
                .options
                .save_formats
                .iter()
                .map(|format| {
                    (
                        *format,
                        PathBuf::from(format!("{}.{}", basename, format.extension())),
                    )
                })
                .collect(),
        }
    }

    /// Prints the figures (unless quiet) and saves them in every requested
    /// format.
    pub fn finish(&self) -> Result<()> {
        if self.figures.is_empty() {
            warn!("Nothing to draw");
        }
        if !self.options.quiet {
            print!("{}", self.render());
        }
        for (format, path) in self.save_paths() {
            fs::write(&path, self.render_as(format))
                .map_err(|source| Error::Save { path: path.clone(), source })?;
            info!("Saved chart to {}", path.display());
        }
        Ok(())
    }
}

impl RenderSink for TermSink {
    fn histogram(
        &mut self,
        values: &[f64],
        bins: &BinSpec,
        style: &Style,
        hist_type: HistType,
        options: HistogramOptions,
    ) {
        let hist = Histogram::new(values, bins, style.clone(), hist_type, options);
        self.figure().panels.push(Panel::Histogram(hist));
    }

    fn bars(
        &mut self,
        categories: &[String],
        values: &[f64],
        errors: Option<&[f64]>,
        style: &Style,
        logscale: bool,
    ) {
        let precision = self.options.precision;
        let figure = self.figure();
        let reuse = matches!(
            figure.panels.last(),
            Some(Panel::Bars(chart)) if chart.categories() == categories && chart.is_log() == logscale
        );
        if !reuse {
            figure.panels.push(Panel::Bars(BarChart::new(
                categories.to_vec(),
                precision,
                logscale,
            )));
        }
        if let Some(Panel::Bars(chart)) = figure.panels.last_mut() {
            chart.push(BarSeries {
                values: values.to_vec(),
                errors: errors.map(|e| e.to_vec()),
                style: style.clone(),
            });
        }
    }

    fn line(&mut self, x: &[f64], y: &[f64], axis: Axis, style: &Style) {
        let options = self.options.clone();
        self.figure()
            .xy(axis, &options)
            .push(XySeries::new(x, y, style.clone()));
    }

    fn scatter(&mut self, x: &[f64], y: &[f64], style: &Style) {
        self.line(x, y, Axis::Primary, style);
    }

    fn end_figure(&mut self) {
        self.open = false;
    }
}

/// A sink that remembers what it was asked to draw.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub calls: Vec<Call>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Histogram {
        values: Vec<f64>,
        bins: BinSpec,
        style: Style,
        hist_type: HistType,
    },
    Bars {
        categories: Vec<String>,
        values: Vec<f64>,
        errors: Option<Vec<f64>>,
        style: Style,
        logscale: bool,
    },
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        axis: Axis,
        style: Style,
    },
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        style: Style,
    },
    EndFigure,
}

#[cfg(test)]
impl RenderSink for RecordingSink {
    fn histogram(
        &mut self,
        values: &[f64],
        bins: &BinSpec,
        style: &Style,
        hist_type: HistType,
        _options: HistogramOptions,
    ) {
        self.calls.push(Call::Histogram {
            values: values.to_vec(),
            bins: bins.clone(),
            style: style.clone(),
            hist_type,
        });
    }

    fn bars(
        &mut self,
        categories: &[String],
        values: &[f64],
        errors: Option<&[f64]>,
        style: &Style,
        logscale: bool,
    ) {
        self.calls.push(Call::Bars {
            categories: categories.to_vec(),
            values: values.to_vec(),
            errors: errors.map(|e| e.to_vec()),
            style: style.clone(),
            logscale,
        });
    }

    fn line(&mut self, x: &[f64], y: &[f64], axis: Axis, style: &Style) {
        self.calls.push(Call::Line {
            x: x.to_vec(),
            y: y.to_vec(),
            axis,
            style: style.clone(),
        });
    }

    fn scatter(&mut self, x: &[f64], y: &[f64], style: &Style) {
        self.calls.push(Call::Scatter {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
    }

    fn end_figure(&mut self) {
        self.calls.push(Call::EndFigure);
    }
}
