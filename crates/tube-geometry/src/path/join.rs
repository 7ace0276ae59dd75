//! Corner joins: bevel, round, and miter.

use tube_core::{Result, Tolerance, TubeError};
use tube_math::{bevel_parameter, direction};

use super::Path;
use crate::control_point::ControlPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinStyle {
    Bevel,
    Round,
    Miter,
}

impl Path {
    /// Cut every corner with a straight chamfer `radius` wide.
    pub fn bevel_join(&self, radius: f64) -> Result<Path> {
        self.join(JoinStyle::Bevel, radius)
    }

    /// Replace every corner with a quadratic arc controlled by the corner itself.
    pub fn round_join(&self, radius: f64) -> Result<Path> {
        self.join(JoinStyle::Round, radius)
    }

    /// Replace every corner with a chamfer plus a tip pushed out along the bisector.
    pub fn miter_join(&self, radius: f64) -> Result<Path> {
        self.join(JoinStyle::Miter, radius)
    }

    fn join(&self, style: JoinStyle, radius: f64) -> Result<Path> {
        if self.has_non_poly() {
            return Err(TubeError::InvalidOperation(
                "joins need a polyline; flatten curves with to_poly first".into(),
            ));
        }
        let n = self.points.len();
        if n < 2 {
            return Err(TubeError::TooFewPoints { min: 2, actual: n });
        }

        let corners = if self.closed { 0..n } else { 1..n - 1 };
        let mut points = Vec::with_capacity(n * 3);
        if !self.closed {
            points.push(self.points[0]);
        }
        for i in corners {
            let prev = &self.points[(i + n - 1) % n];
            let next = &self.points[(i + 1) % n];
            corner_points(style, prev, &self.points[i], next, radius, &mut points)?;
        }
        if !self.closed {
            push_distinct(&mut points, self.points[n - 1]);
        }
        if self.closed && points.len() > 2 {
            let (first, last) = (points[0], points[points.len() - 1]);
            if coincident(&first, &last) {
                points[0].left_handle = first.left_handle.or(last.left_handle);
                points.pop();
            }
        }

        Ok(Path {
            points,
            closed: self.closed,
        })
    }
}

fn corner_points(
    style: JoinStyle,
    prev: &ControlPoint,
    corner: &ControlPoint,
    next: &ControlPoint,
    radius: f64,
    out: &mut Vec<ControlPoint>,
) -> Result<()> {
    let t_in = bevel_parameter(prev.position.distance(corner.position), radius)?;
    let t_out = bevel_parameter(corner.position.distance(next.position), radius)?;

    let [_, mut entry, _] = ControlPoint::divide(prev, corner, t_in);
    let [_, exit, _] = ControlPoint::divide(corner, next, 1.0 - t_out);

    match style {
        JoinStyle::Bevel => {
            push_distinct(out, entry);
            push_distinct(out, exit);
        }
        JoinStyle::Round => {
            entry.right_handle = Some(corner.position);
            push_distinct(out, entry);
            push_distinct(out, exit);
        }
        JoinStyle::Miter => {
            let incoming = direction(prev.position, corner.position)?;
            let outgoing = direction(corner.position, next.position)?;
            // Straight-through corners have no outward side; the tip stays on the corner.
            let position = match (incoming - outgoing).try_normalize() {
                Some(outward) => corner.position + outward * (radius * 0.5),
                None => corner.position,
            };
            let tip = ControlPoint {
                position,
                ..corner.without_handles()
            };
            for point in [entry, tip, exit] {
                push_distinct(out, point);
            }
        }
    }
    Ok(())
}

fn coincident(a: &ControlPoint, b: &ControlPoint) -> bool {
    Tolerance::default().is_zero_length(a.position.distance(b.position))
}

/// Insets clamped to half a short segment meet at its midpoint; emit that point once.
fn push_distinct(out: &mut Vec<ControlPoint>, point: ControlPoint) {
    match out.last_mut() {
        Some(last) if coincident(last, &point) => {
            *last = ControlPoint {
                left_handle: last.left_handle.or(point.left_handle),
                ..point
            };
        }
        _ => out.push(point),
    }
}
