//! Arc-length driven transforms: dashing and even resampling.

use tracing::{debug, trace};
use tube_core::{Result, Tolerance, TubeError};

use super::Path;
use crate::control_point::ControlPoint;

impl Path {
    /// Cut the path into dashes of `dash_length` separated by gaps of `gap_length`.
    ///
    /// The pattern starts `offset` along the path. The last dash may be shorter than
    /// `dash_length` when the path ends inside it; a path ending inside a gap yields
    /// no trailing dash.
    pub fn dash(&self, dash_length: f64, gap_length: f64, offset: f64) -> Result<Vec<Path>> {
        let tolerance = Tolerance::default();
        if !(dash_length > tolerance.linear && dash_length.is_finite()) {
            return Err(TubeError::invalid_parameter(format!(
                "dash length {dash_length}"
            )));
        }
        if !(gap_length >= 0.0 && gap_length.is_finite()) {
            return Err(TubeError::invalid_parameter(format!("gap length {gap_length}")));
        }
        if !(offset >= 0.0 && offset.is_finite()) {
            return Err(TubeError::invalid_parameter(format!("dash offset {offset}")));
        }

        let mut rest = self.opened();
        rest.require_segments()?;
        if offset > 0.0 {
            rest = rest.divide_at_length(offset)?.1;
        }

        let mut dashes = Vec::new();
        while rest.points.len() >= 2 {
            let remaining = rest.length()?;
            if tolerance.is_zero_length(remaining) {
                break;
            }
            let (dash, remainder) = rest.divide_at_length(dash_length)?;
            trace!(remaining, points = dash.points.len(), "dash");
            if dash.points.len() >= 2 {
                dashes.push(dash);
            }
            if remainder.points.len() < 2 {
                break;
            }
            rest = remainder.divide_at_length(gap_length)?.1;
        }

        debug!(
            dash_length,
            gap_length,
            offset,
            dashes = dashes.len(),
            "Dashed path"
        );
        Ok(dashes)
    }

    /// Resample a polyline at a fixed arc-length `step`.
    ///
    /// The first and last points are kept exactly; a closed path stays closed.
    pub fn evenly_distributed(&self, step: f64) -> Result<Path> {
        if self.has_non_poly() {
            return Err(TubeError::InvalidOperation(
                "even resampling needs a polyline; flatten curves with to_poly first".into(),
            ));
        }
        if self.points.len() < 2 {
            return Err(TubeError::TooFewPoints {
                min: 2,
                actual: self.points.len(),
            });
        }
        if !(step > 0.0 && step.is_finite()) {
            return Err(TubeError::invalid_parameter(format!("resample step {step}")));
        }

        let tolerance = Tolerance::default();
        let path = self.opened();
        let lengths = path.segment_lengths()?;
        let total: f64 = lengths.iter().sum();

        let mut points = vec![path.points[0]];
        let mut index = 0;
        let mut start = 0.0;
        let mut k = 1;
        loop {
            let target = step * k as f64;
            if tolerance.reaches(target, total) {
                break;
            }
            while index < lengths.len() && start + lengths[index] < target {
                start += lengths[index];
                index += 1;
            }
            if index == lengths.len() {
                break;
            }
            let t = (target - start) / lengths[index];
            let [_, sample, _] =
                ControlPoint::divide(&path.points[index], &path.points[index + 1], t);
            points.push(sample);
            k += 1;
        }

        if !self.closed {
            points.push(path.points[path.points.len() - 1]);
        }

        debug!(
            step,
            input = self.points.len(),
            output = points.len(),
            "Resampled path"
        );
        Ok(Path {
            points,
            closed: self.closed,
        })
    }
}
