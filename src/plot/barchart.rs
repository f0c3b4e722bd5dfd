use std::fmt;

use yansi::Color::Blue;

use crate::format::{F64Formatter, HorizontalScale, BAR_CHAR};
use crate::style::Style;

#[derive(Debug)]
pub struct BarSeries {
    pub values: Vec<f64>,
    pub errors: Option<Vec<f64>>,
    pub style: Style,
}

impl BarSeries {
    fn extent(&self, category: usize) -> f64 {
        let error = self
            .errors
            .as_ref()
            .and_then(|e| e.get(category))
            .copied()
            .unwrap_or(0.0);
        self.values[category] + error.abs()
    }
}

#[derive(Debug)]
/// Bars grouped by category, one bar per series in every group.
pub struct BarChart {
    categories: Vec<String>,
    series: Vec<BarSeries>,
    precision: Option<usize>,
    log: bool,
}

impl BarChart {
    /// A chart without series.  With `log`, bar lengths follow a
    /// logarithmic scale.
    pub fn new(categories: Vec<String>, precision: Option<usize>, log: bool) -> BarChart {
        BarChart {
            categories,
            series: Vec::new(),
            precision,
            log,
        }
    }

    pub fn is_log(&self) -> bool {
        self.log
    }

    /// Adds a series.  It must have one value (and one error, if any) per
    /// category.
    pub fn push(&mut self, series: BarSeries) {
        self.series.push(series);
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn top(&self) -> f64 {
        let mut top: f64 = 0.0;
        for series in self.series.iter() {
            for i in 0..self.categories.len() {
                top = top.max(series.extent(i));
            }
        }
        top
    }

    fn integral(&self) -> bool {
        self.series
            .iter()
            .flat_map(|s| s.values.iter())
            .all(|v| v.fract() == 0.0)
    }

    fn formatter(&self) -> F64Formatter {
        match self.precision {
            Some(n) => F64Formatter::new(n),
            None if self.integral() => F64Formatter::new(0),
            None => F64Formatter::new_with_range(0.0..self.top()),
        }
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = f.width().unwrap_or(100);
        let formatter = self.formatter();
        let label_width = self.categories.iter().fold(1, |acc, c| acc.max(c.len()));
        let value_width = self
            .series
            .iter()
            .flat_map(|s| s.values.iter())
            .map(|v| formatter.format(*v).len())
            .max()
            .unwrap_or(1);
        let fixed = label_width + value_width + 8;
        let bar_width = if width > fixed + 10 { width - fixed - 10 } else { 75 };
        let scale = if self.log {
            HorizontalScale::new_log(self.top(), bar_width, self.integral())
        } else {
            HorizontalScale::new(self.top(), bar_width, self.integral())
        };
        if scale.is_log() {
            write!(f, "{}", scale)?;
        } else {
            writeln!(
                f,
                "Each {} represents {}",
                Style::default().paint(BAR_CHAR),
                Blue.paint(formatter.format(scale.get_scale())),
            )?;
        }
        for series in self.series.iter() {
            if let Some(label) = &series.style.label {
                writeln!(
                    f,
                    "{} {}",
                    series.style.paint(series.style.glyph(BAR_CHAR)),
                    label
                )?;
            }
        }
        for (i, category) in self.categories.iter().enumerate() {
            for (n, series) in self.series.iter().enumerate() {
                let label = if n == 0 { category.as_str() } else { "" };
                let value = series.values[i];
                let glyph = series.style.glyph(BAR_CHAR);
                write!(
                    f,
                    "[{label}] [{value}] {bar}",
                    label = Blue.paint(format!("{:width$}", label, width = label_width)),
                    value = series.style.paint(format!(
                        "{:>width$}",
                        formatter.format(value),
                        width = value_width
                    )),
                    bar = series.style.paint(scale.get_bar(value, glyph)),
                )?;
                if let Some(error) = series.errors.as_ref().map(|e| e[i]) {
                    write!(
                        f,
                        " {}",
                        series.style.paint_error(format!("± {}", formatter.format(error)))
                    )?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Colour;
    use yansi::Paint;

    fn chart() -> BarChart {
        let mut chart = BarChart::new(
            vec![String::from("apples"), String::from("figs")],
            None,
            false,
        );
        chart.push(BarSeries {
            values: vec![3.0, 1.0],
            errors: Some(vec![0.0, 2.0]),
            style: Style {
                label: Some(String::from("2020")),
                ..Default::default()
            },
        });
        chart.push(BarSeries {
            values: vec![0.0, 2.0],
            errors: None,
            style: Style {
                colour: Colour::Green,
                marker: Some('#'),
                ..Default::default()
            },
        });
        chart
    }

    #[test]
    fn test_top() {
        assert_eq!(chart().top(), 3.0);
    }

    #[test]
    fn test_barchart() {
        Paint::disable();
        let display = format!("{}", chart());
        assert!(display.contains("Each ∎ represents 1\n"));
        assert!(display.contains("∎ 2020\n"));
        assert!(display.contains("[apples] [3] ∎∎∎ ± 0\n"));
        assert!(display.contains("[      ] [0] \n"));
        assert!(display.contains("[figs  ] [1] ∎ ± 2\n"));
        assert!(display.contains("[      ] [2] ##\n"));
    }

    #[test]
    fn test_barchart_precision() {
        let mut chart = chart();
        chart.precision = Some(2);
        Paint::disable();
        let display = format!("{}", chart);
        assert!(display.contains("[apples] [3.00] ∎∎∎ ± 0.00\n"));
    }

    #[test]
    fn test_barchart_log_scale() {
        let mut chart = BarChart::new(
            vec![String::from("a"), String::from("b"), String::from("c")],
            None,
            true,
        );
        chart.push(BarSeries {
            values: vec![999.0, 99.0, 0.0],
            errors: None,
            style: Style::default(),
        });
        Paint::disable();
        let display = format!("{:58}", chart);
        assert!(display.contains("Logarithmic scale: each ∎ multiplies 1 + count by"));
        let bars: Vec<usize> = display
            .lines()
            .filter(|l| l.starts_with('['))
            .map(|l| l.matches('∎').count())
            .collect();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[2], 0);
        // 1000 is to 100 as 3 is to 2
        assert_eq!(bars[0] % 3, 0);
        assert_eq!(bars[1], bars[0] / 3 * 2);
    }
}
