use std::{fmt, str::FromStr};

use crate::foundation::error::{SliceStripError, SliceStripResult};

/// Anatomical plane swept by a slice series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Sagittal,
    Coronal,
    Axial,
}

impl Axis {
    /// Map the CLI index (`0`, `1`, `2`) to an axis.
    pub fn from_index(index: i64) -> SliceStripResult<Self> {
        match index {
            0 => Ok(Self::Sagittal),
            1 => Ok(Self::Coronal),
            2 => Ok(Self::Axial),
            other => Err(SliceStripError::validation(format!(
                "axis must be 0 (sagittal), 1 (coronal) or 2 (axial), got {other}"
            ))),
        }
    }

    /// Plane index as understood by the renderer.
    pub fn index(self) -> u8 {
        match self {
            Self::Sagittal => 0,
            Self::Coronal => 1,
            Self::Axial => 2,
        }
    }

    /// Focal point for a slice at `coord` along this axis.
    ///
    /// The two axes that are not swept stay at fixed offsets.
    pub fn focal_point(self, coord: f64) -> FocalPoint {
        match self {
            Self::Sagittal => FocalPoint::new(coord, -18.0, 18.0),
            Self::Coronal => FocalPoint::new(-1.0, coord, 18.0),
            Self::Axial => FocalPoint::new(-1.0, -18.0, coord),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sagittal => "sagittal",
            Self::Coronal => "coronal",
            Self::Axial => "axial",
        })
    }
}

impl FromStr for Axis {
    type Err = SliceStripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sagittal" => Ok(Self::Sagittal),
            "coronal" => Ok(Self::Coronal),
            "axial" => Ok(Self::Axial),
            other => {
                let index = other.parse::<i64>().map_err(|_| {
                    SliceStripError::validation(format!(
                        "axis must be 0, 1 or 2 (or sagittal/coronal/axial), got '{s}'"
                    ))
                })?;
                Self::from_index(index)
            }
        }
    }
}

/// World-space focus handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl FocalPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for FocalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Coordinates sampled from `start` towards `end` by `step`, end inclusive when it lands on
/// the grid (same semantics as `seq start step end`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoordinateRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

/// Upper bound on the coordinates of one range.
pub const MAX_SLICES: usize = 10_000;

// Slack for float steps such as 0.1 so the end point is not lost to rounding.
const GRID_EPSILON: f64 = 1e-9;

impl CoordinateRange {
    /// Create a validated range. The step must be finite and non-zero and the range may hold
    /// at most [`MAX_SLICES`] coordinates.
    ///
    /// A step pointing away from `end` is accepted here and yields an empty range; callers
    /// that need at least one slice check [`CoordinateRange::is_empty`].
    pub fn new(start: f64, end: f64, step: f64) -> SliceStripResult<Self> {
        let range = Self { start, end, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(self) -> SliceStripResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() || !self.step.is_finite() {
            return Err(SliceStripError::validation(
                "coordinates and increment must be finite numbers",
            ));
        }
        if self.step == 0.0 {
            return Err(SliceStripError::validation("increment must be non-zero"));
        }
        match self.checked_len() {
            Some(n) if n <= MAX_SLICES => Ok(()),
            _ => Err(SliceStripError::validation(format!(
                "coordinate range {} -> {} by {} exceeds {MAX_SLICES} slices",
                self.start, self.end, self.step
            ))),
        }
    }

    /// Number of sampled coordinates, `None` when it does not fit in `usize`.
    pub fn checked_len(self) -> Option<usize> {
        let steps = (self.end - self.start) / self.step;
        if steps.is_nan() {
            return None;
        }
        if steps < -GRID_EPSILON {
            return Some(0);
        }
        let whole = (steps + GRID_EPSILON).floor();
        if whole >= usize::MAX as f64 {
            return None;
        }
        (whole as usize).checked_add(1)
    }

    /// Number of sampled coordinates, saturating at `usize::MAX`.
    pub fn len(self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Coordinate of the `n`-th sample. Computed from `start` rather than accumulated.
    pub fn nth(self, n: usize) -> f64 {
        self.start + n as f64 * self.step
    }

    pub fn iter(self) -> impl Iterator<Item = f64> {
        (0..self.len()).map(move |n| self.nth(n))
    }
}

/// Per-slice label derived from the slice counter.
///
/// Counters below 10 get one leading zero; larger counters are printed as-is, so `100`
/// stays `100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SliceLabel(pub usize);

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 10 {
            write!(f, "0{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
