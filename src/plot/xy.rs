use std::fmt;

use yansi::Color::Blue;

use crate::bins::{Bounds, DisplayRange};
use crate::format::{write_header, F64Formatter};
use crate::style::Style;

const POINT_CHAR: char = '●';

#[derive(Debug)]
/// One set of (x, y) points drawn with the same style.
pub struct XySeries {
    pub points: Vec<(f64, f64)>,
    pub style: Style,
}

impl XySeries {
    pub fn new(x: &[f64], y: &[f64], style: Style) -> XySeries {
        XySeries {
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            style,
        }
    }
}

#[derive(Debug)]
/// A struct holding data to plot a XY graph.
pub struct XyPlot {
    series: Vec<XySeries>,
    width: usize,
    height: usize,
    x_range: DisplayRange,
    y_range: DisplayRange,
    precision: Option<usize>,
}

impl XyPlot {
    /// Creates an empty XyPlot.
    ///
    /// `width` is the number of characters of every line, labels included,
    /// and `height` the number of rows.  `x_range` and `y_range` pin the
    /// visible area; open sides follow the data.
    ///
    /// `precision` is an Option with the number of decimals to display.  If
    /// "None" is used, human units will be used, with an heuristic based on the
    /// input data for deciding the units and the decimal places.
    pub fn new(
        width: usize,
        height: usize,
        x_range: DisplayRange,
        y_range: DisplayRange,
        precision: Option<usize>,
    ) -> XyPlot {
        XyPlot {
            series: Vec::new(),
            width,
            height: height.max(2),
            x_range,
            y_range,
            precision,
        }
    }

    pub fn push(&mut self, series: XySeries) {
        self.series.push(series);
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn data_bounds(&self) -> (Bounds, Bounds) {
        let mut x = Bounds::default();
        let mut y = Bounds::default();
        for (px, py) in self.series.iter().flat_map(|s| s.points.iter()) {
            if px.is_finite() && py.is_finite() {
                x.update(*px);
                y.update(*py);
            }
        }
        (x, y)
    }

    /// Visible ranges on both axes.  Degenerate ranges are widened by half a
    /// unit on each side.
    fn ranges(&self) -> (Bounds, Bounds) {
        let (x, y) = self.data_bounds();
        (resolve(x, self.x_range), resolve(y, self.y_range))
    }

    fn formatter(&self, range: Bounds) -> F64Formatter {
        match self.precision {
            None => F64Formatter::new_with_range(range.min..range.max),
            Some(n) => F64Formatter::new(n),
        }
    }

    /// Grid of series indexes, top row first.  Later series are drawn on
    /// top of earlier ones.
    fn grid(&self, columns: usize, x: Bounds, y: Bounds) -> Vec<Vec<Option<usize>>> {
        let mut grid = vec![vec![None; columns]; self.height];
        for (n, series) in self.series.iter().enumerate() {
            for (px, py) in series.points.iter() {
                if !(x.min..=x.max).contains(px) || !(y.min..=y.max).contains(py) {
                    continue;
                }
                let col = scale(*px, x, columns);
                let row = scale(*py, y, self.height);
                grid[self.height - 1 - row][col] = Some(n);
            }
        }
        grid
    }
}

fn resolve(data: Bounds, display: DisplayRange) -> Bounds {
    let (mut min, mut max) = if data.is_empty() {
        (0.0, 1.0)
    } else {
        (data.min, data.max)
    };
    if let Some(m) = display.min {
        min = m;
    }
    if let Some(m) = display.max {
        max = m;
    }
    if min == max {
        Bounds::new(min - 0.5, max + 0.5)
    } else {
        Bounds::new(min, max)
    }
}

fn scale(value: f64, range: Bounds, slots: usize) -> usize {
    let ratio = (value - range.min) / (range.max - range.min);
    ((ratio * (slots - 1) as f64).round() as usize).min(slots - 1)
}

impl fmt::Display for XyPlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = f.width().unwrap_or(110);
        let (x, y) = self.ranges();
        let y_fmt = self.formatter(y);
        let step = (y.max - y.min) / (self.height - 1) as f64;
        let labels: Vec<String> = (0..self.height)
            .map(|r| y_fmt.format(y.max - step * r as f64))
            .collect();
        let y_width = labels.iter().map(|l| l.len()).max().unwrap_or(1);
        let columns = width.saturating_sub(y_width + 3).max(2);
        for series in self.series.iter() {
            if let Some(label) = &series.style.label {
                writeln!(
                    f,
                    "{} {}",
                    series.style.paint(series.style.glyph(POINT_CHAR)),
                    label
                )?;
            }
        }
        let grid = self.grid(columns, x, y);
        for (label, cells) in labels.iter().zip(grid.iter()) {
            let row: String = cells
                .iter()
                .map(|cell| match cell {
                    Some(n) => {
                        let style = &self.series[*n].style;
                        style.paint(style.glyph(POINT_CHAR)).to_string()
                    }
                    None => String::from(" "),
                })
                .collect();
            writeln!(
                f,
                "[{}] {}",
                Blue.paint(format!("{:>width$}", label, width = y_width)),
                row
            )?;
        }
        let x_fmt = self.formatter(x);
        write_header(
            f,
            "x range",
            &format!("{} .. {}", x_fmt.format(x.min), x_fmt.format(x.max)),
        )
    }
}
