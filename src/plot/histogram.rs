use std::fmt;
use std::ops::Range;

use yansi::Color::Blue;

use crate::bins::{linear_edges, BinSpec, Bounds, DisplayRange};
use crate::format::{write_header, F64Formatter, HorizontalScale, BAR_CHAR};
use crate::stats::Stats;
use crate::style::{HistType, Style};

#[derive(Debug)]
/// A struct that represents a bucket of an histogram.
struct Bucket {
    range: Range<f64>,
    count: f64,
}

impl Bucket {
    fn new(range: Range<f64>) -> Self {
        Self { range, count: 0.0 }
    }

    fn hidden(&self, display: &DisplayRange) -> bool {
        display.min.map_or(false, |min| self.range.end <= min)
            || display.max.map_or(false, |max| self.range.start >= max)
    }
}

/// Options applied to every histogram of a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistogramOptions {
    /// Show densities instead of counts.
    pub normed: bool,
    /// Show running totals.
    pub cumulative: bool,
    /// Bar lengths on a logarithmic scale.
    pub log: bool,
    /// `precision` is an Option with the number of decimals to display.  If
    /// "None" is used, human units will be used.
    pub precision: Option<usize>,
    /// Buckets entirely outside this range are not displayed.
    pub display: DisplayRange,
}

#[derive(Debug)]
/// A histogram of one dataset, ready to be displayed.
pub struct Histogram {
    vec: Vec<Bucket>,
    // Maximum of all bucket values
    top: f64,
    stats: Stats,
    style: Style,
    hist_type: HistType,
    options: HistogramOptions,
}

impl Histogram {
    /// Creates a Histogram from a non empty slice of values.
    ///
    /// A bin count is turned into evenly spaced edges over the range of the
    /// values.  Values are counted into half-open buckets, except for the last
    /// one, which is closed on both sides; values outside the edges are not
    /// counted.
    pub fn new(
        values: &[f64],
        bins: &BinSpec,
        style: Style,
        hist_type: HistType,
        options: HistogramOptions,
    ) -> Self {
        let stats = Stats::new(values, options.precision);
        let edges = match bins {
            BinSpec::Count(n) => linear_edges(Bounds::new(stats.min, stats.max), *n),
            BinSpec::Edges(edges) => edges.clone(),
        };
        let vec = edges
            .windows(2)
            .map(|w| Bucket::new(w[0]..w[1]))
            .collect();
        let mut histogram = Self {
            vec,
            top: 0.0,
            stats,
            style,
            hist_type,
            options,
        };
        histogram.load(values);
        histogram
    }

    fn load(&mut self, values: &[f64]) {
        for x in values {
            if let Some(slot) = self.find_slot(*x) {
                self.vec[slot].count += 1.0;
            }
        }
        let total: f64 = self.vec.iter().map(|b| b.count).sum();
        if self.options.cumulative {
            let mut running = 0.0;
            for bucket in self.vec.iter_mut() {
                running += bucket.count;
                bucket.count = running;
                if self.options.normed && total > 0.0 {
                    bucket.count /= total;
                }
            }
        } else if self.options.normed && total > 0.0 {
            for bucket in self.vec.iter_mut() {
                bucket.count /= total * (bucket.range.end - bucket.range.start);
            }
        }
        self.top = self.vec.iter().fold(0.0, |acc, b| b.count.max(acc));
    }

    fn find_slot(&self, n: f64) -> Option<usize> {
        let first = self.vec.first()?.range.start;
        let last = self.vec.last()?.range.end;
        if !(first..=last).contains(&n) {
            return None;
        }
        let slot = self.vec.partition_point(|b| b.range.end <= n);
        Some(slot.min(self.vec.len() - 1))
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(label) = &self.style.label {
            write_header(f, "Dataset", label)?;
        }
        write!(f, "{}", self.stats)?;
        let writer = HistWriter {
            width: f.width().unwrap_or(110),
            formatter: self.stats.formatter(),
        };
        writer.write(f, self)
    }
}

struct HistWriter {
    width: usize,
    formatter: F64Formatter,
}

impl HistWriter {
    pub fn write(&self, f: &mut fmt::Formatter, hist: &Histogram) -> fmt::Result {
        let integral = !hist.options.normed;
        let visible: Vec<&Bucket> = hist
            .vec
            .iter()
            .filter(|b| !b.hidden(&hist.options.display))
            .collect();
        let width_range = self.get_width(&visible);
        let width_count = HorizontalScale::new(hist.top, 1, integral)
            .format_units(hist.top)
            .len();
        let bar_len = self.get_max_bar_len(2 * width_range + width_count);
        let horizontal_scale = if hist.options.log {
            HorizontalScale::new_log(hist.top, bar_len, integral)
        } else {
            HorizontalScale::new(hist.top, bar_len, integral)
        };
        writeln!(f, "{}", horizontal_scale)?;
        for bucket in visible {
            self.write_bucket(f, hist, bucket, &horizontal_scale, width_range, width_count)?;
        }
        Ok(())
    }

    fn write_bucket(
        &self,
        f: &mut fmt::Formatter,
        hist: &Histogram,
        bucket: &Bucket,
        horizontal_scale: &HorizontalScale,
        width: usize,
        width_count: usize,
    ) -> fmt::Result {
        let glyph = hist.style.glyph(BAR_CHAR);
        let bar = match hist.hist_type {
            HistType::Step => horizontal_scale.get_step(bucket.count, glyph),
            _ => horizontal_scale.get_bar(bucket.count, glyph),
        };
        writeln!(
            f,
            "[{range}] [{count}] {bar}",
            range = Blue.paint(format!(
                "{:>width$} .. {:>width$}",
                self.formatter.format(bucket.range.start),
                self.formatter.format(bucket.range.end),
                width = width,
            )),
            count = hist
                .style
                .paint(horizontal_scale.get_count(bucket.count, width_count)),
            bar = hist.style.paint(bar),
        )
    }

    fn get_width(&self, buckets: &[&Bucket]) -> usize {
        buckets
            .iter()
            .flat_map(|b| vec![b.range.start, b.range.end])
            .map(|v| self.formatter.format(v).len())
            .max()
            .unwrap_or(1)
    }

    fn get_max_bar_len(&self, fixed_width: usize) -> usize {
        const EXTRA_CHARS: usize = 12;
        if self.width < fixed_width + EXTRA_CHARS {
            75
        } else {
            self.width - fixed_width - EXTRA_CHARS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Colour;
    use float_eq::assert_float_eq;
    use yansi::Paint;

    const VALUES: &[f64] = &[
        -1.0, -1.1, 2.0, 2.0, 2.1, -0.9, 11.0, 11.2, 1.9, 1.99, 1.98, 1.97, 1.96, 14.0, -2.0,
    ];

    fn counts(hist: &Histogram) -> Vec<f64> {
        hist.vec.iter().map(|b| b.count).collect()
    }

    fn new_hist(bins: BinSpec, options: HistogramOptions) -> Histogram {
        Histogram::new(VALUES, &bins, Style::default(), HistType::Bar, options)
    }

    #[test]
    fn count_bins() {
        let hist = new_hist(BinSpec::Count(8), HistogramOptions::default());
        assert_eq!(hist.vec.len(), 8);
        assert_eq!(hist.vec[0].range, -2.0..0.0);
        assert_eq!(counts(&hist), [4.0, 5.0, 3.0, 0.0, 0.0, 0.0, 2.0, 1.0]);
        assert_float_eq!(hist.top, 5.0, abs <= 0.0);
    }

    #[test]
    fn explicit_edges() {
        let hist = new_hist(
            BinSpec::Edges(vec![-0.5, 0.5, 1.5, 2.5]),
            HistogramOptions::default(),
        );
        // Values outside of the edges are not counted
        assert_eq!(counts(&hist), [0.0, 0.0, 8.0]);
    }

    #[test]
    fn find_slot() {
        let hist = new_hist(
            BinSpec::Edges(vec![0.0, 1.0, 2.0, 4.0]),
            HistogramOptions::default(),
        );
        assert_eq!(hist.find_slot(-0.1), None);
        assert_eq!(hist.find_slot(0.0), Some(0));
        assert_eq!(hist.find_slot(1.0), Some(1));
        assert_eq!(hist.find_slot(3.9), Some(2));
        assert_eq!(hist.find_slot(4.0), Some(2));
        assert_eq!(hist.find_slot(4.1), None);
        assert_eq!(hist.find_slot(f64::NAN), None);
    }

    #[test]
    fn cumulative_and_normed() {
        let options = HistogramOptions {
            cumulative: true,
            ..Default::default()
        };
        let hist = new_hist(BinSpec::Count(8), options);
        assert_eq!(counts(&hist), [4.0, 9.0, 12.0, 12.0, 12.0, 12.0, 14.0, 15.0]);

        let options = HistogramOptions {
            normed: true,
            ..Default::default()
        };
        let hist = new_hist(BinSpec::Count(8), options);
        let area: f64 = hist
            .vec
            .iter()
            .map(|b| b.count * (b.range.end - b.range.start))
            .sum();
        assert_float_eq!(area, 1.0, abs <= 1e-12);

        let options = HistogramOptions {
            normed: true,
            cumulative: true,
            ..Default::default()
        };
        let hist = new_hist(BinSpec::Count(8), options);
        assert_float_eq!(hist.vec[7].count, 1.0, abs <= 1e-12);
    }

    #[test]
    fn display_test() {
        let options = HistogramOptions {
            precision: Some(3),
            ..Default::default()
        };
        let style = Style {
            label: Some(String::from("latency")),
            ..Default::default()
        };
        let hist = Histogram::new(VALUES, &BinSpec::Count(8), style, HistType::Bar, options);
        Paint::disable();
        let display = format!("{}", hist);
        assert!(display.contains("Dataset: latency\n"));
        assert!(display.contains("Samples = 15; Min = -2.000; Max = 14.000"));
        assert!(display.contains("[-2.000 ..  0.000] [4] ∎∎∎∎\n"));
        assert!(display.contains("[ 0.000 ..  2.000] [5] ∎∎∎∎∎\n"));
        assert!(display.contains("[ 6.000 ..  8.000] [0] \n"));
        assert!(display.contains("[12.000 .. 14.000] [1] ∎\n"));
    }

    #[test]
    fn display_markers_and_steps() {
        let options = HistogramOptions {
            precision: Some(0),
            ..Default::default()
        };
        let style = Style {
            colour: Colour::Blue,
            marker: Some('#'),
            ..Default::default()
        };
        let hist = Histogram::new(VALUES, &BinSpec::Count(8), style.clone(), HistType::Bar, options);
        Paint::disable();
        let display = format!("{}", hist);
        assert!(display.contains("[ 0 ..  2] [5] #####\n"));
        let hist = Histogram::new(VALUES, &BinSpec::Count(8), style, HistType::Step, options);
        let display = format!("{}", hist);
        assert!(display.contains("[ 0 ..  2] [5]     #\n"));
    }

    #[test]
    fn display_log_scale() {
        let values: Vec<f64> = std::iter::repeat(0.5)
            .take(99)
            .chain(std::iter::repeat(1.5).take(9))
            .chain(std::iter::once(2.5))
            .collect();
        let options = HistogramOptions {
            precision: Some(0),
            log: true,
            ..Default::default()
        };
        let hist = Histogram::new(
            &values,
            &BinSpec::Edges(vec![0.0, 1.0, 2.0, 3.0, 4.0]),
            Style::default(),
            HistType::Bar,
            options,
        );
        Paint::disable();
        let display = format!("{:40}", hist);
        assert!(display.contains("Logarithmic scale: each ∎ multiplies 1 + count by"));
        let bar = |line: &str| {
            display
                .lines()
                .find(|l| l.starts_with(line))
                .map(|l| l.matches('∎').count())
                .unwrap()
        };
        let hundred = bar("[0 .. 1]");
        let ten = bar("[1 .. 2]");
        let two = bar("[2 .. 3]");
        assert_eq!(bar("[3 .. 4]"), 0);
        assert!(two > 0 && two < ten && ten < hundred);
        // Ten times the count is a fixed number of extra characters
        assert!((hundred as i64 - 2 * ten as i64).abs() <= 1);
    }

    #[test]
    fn display_hides_offscreen_buckets() {
        let options = HistogramOptions {
            precision: Some(1),
            display: DisplayRange {
                min: Some(-0.5),
                max: Some(1.5),
            },
            ..Default::default()
        };
        let hist = Histogram::new(
            VALUES,
            &BinSpec::Edges(vec![-5.0, -1.0, 0.0, 1.0, 15.0]),
            Style::default(),
            HistType::Bar,
            options,
        );
        Paint::disable();
        let display = format!("{}", hist);
        assert!(!display.contains("-5.0 .."));
        assert!(display.contains("[-1.0 ..  0.0] [ 2] ∎∎\n"));
        assert!(display.contains("[ 1.0 .. 15.0] [11] ∎∎∎∎∎∎∎∎∎∎∎\n"));
    }
}
