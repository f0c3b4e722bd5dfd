use std::fmt;
use std::ops::Range;

use yansi::Color::{Blue, Green};

use crate::style::Style;

// Units-based suffixes for human formatting.
const UNITS: &[&str] = &["", " K", " M", " G", " T", " P", " E", " Z", " Y"];
pub const BAR_CHAR: char = '∎';

#[derive(Debug, Clone)]
pub struct F64Formatter {
    /// Decimals digits to be used
    decimals: usize,
    /// Number of times the value will be divided by 1000
    divisor: u8,
    /// Suffix (typically units) to be printed after number
    suffix: &'static str,
}

impl F64Formatter {
    /// A formatter with a fixed number of decimals and no units.
    pub fn new(decimals: usize) -> F64Formatter {
        F64Formatter {
            decimals,
            divisor: 0,
            suffix: UNITS[0],
        }
    }

    /// A formatter for numbers in `range`, choosing units and decimals so
    /// that values in the range can be told apart.
    pub fn new_with_range(range: Range<f64>) -> F64Formatter {
        let difference = range.end - range.start;
        if difference == 0.0 || !difference.is_finite() {
            return F64Formatter::new(3);
        }
        let log = difference.abs().log10() as i64;
        if log <= 0 {
            return F64Formatter::new((-log as usize).min(8) + 3);
        }
        let divisor = ((log - 1) / 3).min(5) as u8;
        F64Formatter {
            decimals: log.rem_euclid(3) as usize,
            divisor,
            suffix: UNITS[divisor as usize],
        }
    }

    pub fn format(&self, number: f64) -> String {
        format!(
            "{:.*}{}",
            self.decimals,
            number / 1000_usize.pow(self.divisor.into()) as f64,
            self.suffix
        )
    }
}

/// How bar lengths relate to the values they represent.
pub struct HorizontalScale {
    /// How many units are represented by a char (orders of magnitude of
    /// `1 + units` on a logarithmic scale)
    scale: f64,
    /// Whether values are counts (and are displayed without decimals)
    integral: bool,
    log: bool,
}

impl HorizontalScale {
    /// A scale fitting values up to `top` in `width` characters.  Integral
    /// scales are whole numbers and never go below 1.
    pub fn new(top: f64, width: usize, integral: bool) -> HorizontalScale {
        let raw = top / width.max(1) as f64;
        let scale = if integral {
            raw.floor().max(1.0)
        } else if raw > 0.0 && raw.is_finite() {
            raw
        } else {
            1.0
        };
        HorizontalScale {
            scale,
            integral,
            log: false,
        }
    }

    /// A logarithmic scale: bars grow with `log10(1 + units)`, so zero draws
    /// nothing and `top` fills `width` characters.
    pub fn new_log(top: f64, width: usize, integral: bool) -> HorizontalScale {
        let raw = log_units(top) / width.max(1) as f64;
        let scale = if raw > 0.0 && raw.is_finite() { raw } else { 1.0 };
        HorizontalScale {
            scale,
            integral,
            log: true,
        }
    }

    pub fn is_log(&self) -> bool {
        self.log
    }

    fn bar_len(&self, units: f64) -> usize {
        let units = if self.log { log_units(units) } else { units };
        // Absorbs rounding, so `top` gets its full width
        (units / self.scale + 1e-9).max(0.0) as usize
    }

    pub fn get_bar(&self, units: f64, glyph: char) -> String {
        let len = self.bar_len(units);
        std::iter::repeat(glyph).take(len).collect()
    }

    /// Like `get_bar`, but draws only the tip of the bar.
    pub fn get_step(&self, units: f64, glyph: char) -> String {
        let len = self.bar_len(units);
        if len == 0 {
            return String::new();
        }
        format!("{:>width$}", glyph, width = len)
    }

    pub fn format_units(&self, units: f64) -> String {
        if self.integral {
            format!("{}", units as u64)
        } else {
            format!("{:.3}", units)
        }
    }

    pub fn get_count(&self, units: f64, width: usize) -> String {
        format!("{:>width$}", self.format_units(units), width = width)
    }

    pub fn get_scale(&self) -> f64 {
        self.scale
    }
}

impl fmt::Display for HorizontalScale {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if self.log {
            return writeln!(
                formatter,
                "Logarithmic scale: each {} multiplies 1 + count by {}",
                Style::default().paint(BAR_CHAR),
                Blue.paint(format!("{:.3}", 10f64.powf(self.scale))),
            );
        }
        writeln!(
            formatter,
            "Each {} represents a count of {}",
            Style::default().paint(BAR_CHAR),
            Blue.paint(self.format_units(self.scale)),
        )
    }
}

fn log_units(units: f64) -> f64 {
    (1.0 + units.max(0.0)).log10()
}

/// A "label: value" header line, skipped when there is no value.
pub fn write_header(f: &mut fmt::Formatter, name: &str, value: &str) -> fmt::Result {
    if value.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}: {}", name, Green.paint(value))
}
