//! Paths: ordered control points, open or closed, and their pure transforms.
//!
//! Every transform borrows the receiver and returns a new value, so a path can
//! be run through a pipeline such as `to_poly -> bevel_join -> with_rounded_caps`
//! without any of the intermediate values being modified.

mod cap;
mod join;
mod resample;

use serde::{Deserialize, Serialize};
use tube_core::{Result, Tolerance, TubeError, Validate};
use tube_math::Point3;

use crate::control_point::ControlPoint;
use crate::shape::Shape;

/// An ordered sequence of control points; a closed path also joins last to first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<ControlPoint>,
    #[serde(default)]
    pub closed: bool,
}

impl Path {
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    pub fn closed(points: Vec<ControlPoint>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// An open polyline through the given positions with default radius and tilt.
    pub fn from_positions(positions: impl IntoIterator<Item = Point3>) -> Self {
        Self::new(positions.into_iter().map(ControlPoint::new).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn positions(&self) -> Vec<Point3> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Number of segments, counting the closing segment of a closed path.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Endpoint pairs of every segment, in order.
    pub fn segments(&self) -> impl Iterator<Item = (&ControlPoint, &ControlPoint)> + '_ {
        let n = self.points.len();
        (0..self.segment_count()).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
    }

    /// True if any point carries a handle, i.e. some segment may be curved.
    pub fn has_non_poly(&self) -> bool {
        self.points.iter().any(ControlPoint::has_handles)
    }

    /// Flatten every segment into handle-free points.
    ///
    /// Shared boundary points appear once. A closed path stays closed: its closing
    /// segment contributes its interior samples only.
    pub fn to_poly(&self, segments_per_curve: usize) -> Result<Path> {
        let count = self.segment_count();
        if count == 0 {
            return Ok(Path {
                points: self.points.iter().map(|p| p.without_handles()).collect(),
                closed: self.closed,
            });
        }

        let mut points = Vec::with_capacity(self.points.len());
        for (i, (start, end)) in self.segments().enumerate() {
            let samples = ControlPoint::to_poly(start, end, segments_per_curve)?;
            let skip = usize::from(i > 0);
            let drop_end = usize::from(self.closed && i == count - 1);
            let take = samples.len().saturating_sub(skip + drop_end);
            points.extend(samples.into_iter().skip(skip).take(take));
        }

        Ok(Path {
            points,
            closed: self.closed,
        })
    }

    /// Sample the path into a cross-section profile.
    pub fn to_shape(&self, segments_per_curve: usize) -> Result<Shape> {
        let poly = self.to_poly(segments_per_curve)?;
        Ok(Shape::new(poly.positions(), poly.closed))
    }

    /// Arc length of every segment, in order.
    pub fn segment_lengths(&self) -> Result<Vec<f64>> {
        self.segments()
            .map(|(start, end)| ControlPoint::length(start, end))
            .collect()
    }

    /// Total arc length, including the closing segment of a closed path.
    pub fn length(&self) -> Result<f64> {
        if !self.has_non_poly() {
            return Ok(self
                .segments()
                .map(|(start, end)| start.position.distance(end.position))
                .sum());
        }
        Ok(self.segment_lengths()?.iter().sum())
    }

    /// Make the closing segment explicit: append a copy of the first point and open the path.
    pub fn close(&self) -> Path {
        let mut points = self.points.clone();
        if let Some(first) = self.points.first() {
            points.push(ControlPoint {
                right_handle: None,
                ..*first
            });
        }
        Path::new(points)
    }

    /// The path as an open sequence; closed paths get their closing segment made explicit.
    fn opened(&self) -> Path {
        if self.closed {
            self.close()
        } else {
            self.clone()
        }
    }

    fn require_segments(&self) -> Result<()> {
        if self.segment_count() == 0 {
            return Err(TubeError::TooFewPoints {
                min: 2,
                actual: self.points.len(),
            });
        }
        Ok(())
    }

    /// Split segment `index` of an open path at local parameter `t`.
    ///
    /// A `t` at either end of the segment splits at that vertex instead of
    /// inserting a coincident copy of it.
    fn split_segment(&self, index: usize, t: f64) -> (Path, Path) {
        let tolerance = Tolerance::default();
        if tolerance.parameter_eq(t, 0.0) {
            return self.split_at_vertex(index);
        }
        if tolerance.parameter_eq(t, 1.0) {
            return self.split_at_vertex(index + 1);
        }

        let [start, mid, end] =
            ControlPoint::divide(&self.points[index], &self.points[index + 1], t);

        let mut first = self.points[..index].to_vec();
        first.extend([start, mid]);

        let mut second = vec![mid, end];
        second.extend_from_slice(&self.points[index + 2..]);

        (Path::new(first), Path::new(second))
    }

    /// Split an open path at an existing vertex; both halves share it.
    fn split_at_vertex(&self, index: usize) -> (Path, Path) {
        (
            Path::new(self.points[..=index].to_vec()),
            Path::new(self.points[index..].to_vec()),
        )
    }

    /// Split at global parameter `t` in `[0, 1]`, spread evenly over segments.
    ///
    /// Segment `floor(t * N)` is split at the fractional remainder. A `t` past the
    /// last segment returns `(whole, empty)`; a negative `t` returns `(empty, whole)`.
    /// Closed paths are opened first; both halves are open.
    pub fn divide(&self, t: f64) -> Result<(Path, Path)> {
        if !t.is_finite() {
            return Err(TubeError::invalid_parameter(format!("divide parameter {t}")));
        }
        let path = self.opened();
        path.require_segments()?;

        if t < 0.0 {
            return Ok((Path::default(), path));
        }
        let segments = path.segment_count();
        let scaled = t * segments as f64;
        let index = scaled.floor() as usize;
        if index >= segments {
            return Ok((path, Path::default()));
        }
        Ok(path.split_segment(index, scaled - index as f64))
    }

    /// Split at arc length `length` from the start.
    ///
    /// Lengths within tolerance of zero return `(empty, whole)`; lengths reaching the
    /// end within tolerance return `(whole, empty)`.
    pub fn divide_at_length(&self, length: f64) -> Result<(Path, Path)> {
        if !length.is_finite() {
            return Err(TubeError::invalid_parameter(format!("divide length {length}")));
        }
        let path = self.opened();
        path.require_segments()?;

        let tolerance = Tolerance::default();
        let lengths = path.segment_lengths()?;
        let total: f64 = lengths.iter().sum();

        if length <= tolerance.linear {
            return Ok((Path::default(), path));
        }
        if tolerance.reaches(length, total) {
            return Ok((path, Path::default()));
        }

        let mut start = 0.0;
        for (index, &segment) in lengths.iter().enumerate() {
            if !tolerance.is_zero_length(segment) && length <= start + segment {
                let local = length - start;
                if tolerance.is_zero_length(segment - local) {
                    return Ok(path.split_at_vertex(index + 1));
                }
                if tolerance.is_zero_length(local) {
                    return Ok(path.split_at_vertex(index));
                }
                return Ok(path.split_segment(index, local / segment));
            }
            start += segment;
        }
        Ok((path, Path::default()))
    }

    /// The part of the path between length fractions `start` and `end`.
    pub fn slice(&self, start: f64, end: f64) -> Result<Path> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || start > end {
            return Err(TubeError::invalid_parameter(format!(
                "slice range {start}..{end}"
            )));
        }
        let total = self.length()?;
        let (head, _) = self.divide_at_length(end * total)?;
        if head.points.len() < 2 {
            return Ok(Path::default());
        }
        let (_, middle) = head.divide_at_length(start * total)?;
        Ok(middle)
    }
}

impl Validate for Path {
    fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(TubeError::TooFewPoints {
                min: 2,
                actual: self.points.len(),
            });
        }
        for (i, p) in self.points.iter().enumerate() {
            let handles_finite = [p.left_handle, p.right_handle]
                .iter()
                .flatten()
                .all(|h| h.is_finite());
            if !p.position.is_finite() || !handles_finite {
                return Err(TubeError::Validation(format!(
                    "point {i} has a non-finite coordinate"
                )));
            }
            if !(p.radius >= 0.0 && p.radius.is_finite()) {
                return Err(TubeError::Validation(format!(
                    "point {i} has invalid radius {}",
                    p.radius
                )));
            }
            if !p.tilt.is_finite() {
                return Err(TubeError::Validation(format!("point {i} has invalid tilt")));
            }
        }
        Ok(())
    }
}
