//! Histogram bin edges.
//!
//! Bins are either a plain count (left to whoever draws the histogram) or an
//! explicit list of ascending edges.  Edges are computed from the range of a
//! dataset, or from the range of all datasets when several inputs must share
//! the same bins.

use crate::error::{ConfigError, Error, Result};

/// Upper bound for the number of edges of a histogram.
pub const MAX_EDGES: usize = 1_000_000;

/// The number of bins used when neither a count nor a width is requested.
pub const DEFAULT_BINS: usize = 10;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinRequest {
    /// A number of equally sized bins.
    Count(usize),
    /// Bins of a fixed width, aligned on multiples of the width.
    Width(f64),
}

impl Default for BinRequest {
    fn default() -> Self {
        BinRequest::Count(DEFAULT_BINS)
    }
}

impl BinRequest {
    /// Builds a request from the (mutually exclusive) count and width options.
    pub fn new(count: Option<usize>, width: Option<f64>) -> std::result::Result<Self, ConfigError> {
        match (count, width) {
            (Some(_), Some(_)) => Err(ConfigError::BinsAndBinSize),
            (Some(0), None) => Err(ConfigError::ZeroBins),
            (Some(n), None) if n >= MAX_EDGES => Err(ConfigError::TooManyBins {
                got: n,
                max: MAX_EDGES - 1,
            }),
            (Some(n), None) => Ok(BinRequest::Count(n)),
            (None, Some(w)) if !(w.is_finite() && w > 0.0) => Err(ConfigError::InvalidBinSize(w)),
            (None, Some(w)) => Ok(BinRequest::Width(w)),
            (None, None) => Ok(BinRequest::default()),
        }
    }
}

/// The bins handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum BinSpec {
    Count(usize),
    Edges(Vec<f64>),
}

/// Lower and upper bound of a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    pub fn update(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn merge(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True until a value has been seen.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// Visible part of the x axis.  Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Everything needed to compute the bins of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BinOptions {
    pub request: BinRequest,
    /// Unless disabled, fixed width bins are shifted by half their width so
    /// values fall near bucket centres.
    pub disable_offset: bool,
    pub display: DisplayRange,
}

impl BinOptions {
    /// Computes the bins of a dataset with range `bounds`.
    ///
    /// When `shared` is false and a count was requested, the count is passed
    /// through and the renderer picks the edges.  Otherwise explicit edges are
    /// returned, so datasets given the same bounds get the very same bins.
    pub fn bins(&self, bounds: Bounds, shared: bool) -> Result<BinSpec> {
        match self.request {
            BinRequest::Count(n) if !shared => Ok(BinSpec::Count(n)),
            BinRequest::Count(n) => Ok(BinSpec::Edges(linear_edges(bounds, n))),
            BinRequest::Width(w) => {
                let edges = width_edges(bounds, w, !self.disable_offset)?;
                Ok(BinSpec::Edges(clip_edges(edges, bounds, self.display)))
            }
        }
    }
}

/// `n + 1` evenly spaced edges from `bounds.min` to `bounds.max`, both
/// included.  A degenerate range is widened by half a unit on each side.
pub fn linear_edges(bounds: Bounds, n: usize) -> Vec<f64> {
    let (min, max) = if bounds.min == bounds.max {
        (bounds.min - 0.5, bounds.max + 0.5)
    } else {
        (bounds.min, bounds.max)
    };
    let step = (max - min) / n as f64;
    let mut edges: Vec<f64> = (0..n).map(|i| min + step * i as f64).collect();
    edges.push(max);
    edges
}

/// Edges of width `width` covering `bounds`.
///
/// The first edge is the largest multiple of `width` not above the minimum,
/// moved left by half a width (`offset`) or by a whole one.  Edges follow
/// while they do not exceed the maximum, plus a final one closing the last
/// bin.
pub fn width_edges(bounds: Bounds, width: f64, offset: bool) -> Result<Vec<f64>> {
    let span = (bounds.max - bounds.min) / width;
    if !span.is_finite() || span > MAX_EDGES as f64 {
        return Err(Error::TooManyBins {
            width,
            min: bounds.min,
            max: bounds.max,
        });
    }
    let mut start = (bounds.min / width).floor() * width;
    start -= if offset { width / 2.0 } else { width };
    let mut edges = Vec::with_capacity(span as usize + 3);
    let mut k = 0;
    loop {
        let edge = start + width * k as f64;
        edges.push(edge);
        if edge > bounds.max {
            break;
        }
        k += 1;
    }
    Ok(edges)
}

/// Merges the edges that fall outside the display range.
///
/// Below the visible minimum, everything from the first edge up to the last
/// edge not above the minimum becomes a single bin, provided at least two
/// edges would go away.  Above the visible maximum, the first edge past the
/// maximum and everything after it collapse into the final edge, provided
/// something is left to drop.  Edges are only removed, never reordered.
pub fn clip_edges(mut edges: Vec<f64>, bounds: Bounds, display: DisplayRange) -> Vec<f64> {
    if let Some(low) = display.min {
        if low > bounds.min {
            let first_onscreen = edges.iter().rposition(|e| *e <= low);
            if let Some(k) = first_onscreen {
                if k >= 2 {
                    edges.drain(1..k);
                }
            }
        }
    }
    if let Some(high) = display.max {
        if high < bounds.max {
            let last_onscreen = edges.iter().position(|e| *e > high);
            if let Some(k) = last_onscreen {
                if k + 1 < edges.len() {
                    edges.drain(k..edges.len() - 1);
                }
            }
        }
    }
    edges
}
