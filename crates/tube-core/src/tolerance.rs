/// Numeric thresholds shared by the path transforms and the extruder.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Lengths at or below this are treated as zero (in model units)
    pub linear: f64,
    /// Curve parameters closer than this are treated as equal
    pub parametric: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_PARAMETRIC: f64 = 1e-9;

    /// Check if a length is zero within linear tolerance
    pub fn is_zero_length(self, length: f64) -> bool {
        length.abs() <= self.linear
    }

    /// Check if `target` reaches the end of a run of total length `total`
    pub fn reaches(self, target: f64, total: f64) -> bool {
        target >= total - self.linear
    }

    /// Check if two curve parameters coincide
    pub fn parameter_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.parametric
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            parametric: Self::DEFAULT_PARAMETRIC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches() {
        let tol = Tolerance::default();
        assert!(tol.reaches(1.0, 1.0));
        assert!(tol.reaches(1.0 - 1e-9, 1.0));
        assert!(tol.reaches(2.0, 1.0));
        assert!(!tol.reaches(0.9, 1.0));
    }

    #[test]
    fn test_zero_length() {
        let tol = Tolerance::default();
        assert!(tol.is_zero_length(0.0));
        assert!(tol.is_zero_length(-1e-8));
        assert!(!tol.is_zero_length(1e-3));
    }

    #[test]
    fn test_parameter_eq() {
        let tol = Tolerance::default();
        assert!(tol.parameter_eq(1.0, 1.0 - 1e-12));
        assert!(!tol.parameter_eq(0.0, 1e-6));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let tol: Tolerance = serde_json::from_str(r#"{ "linear": 0.001 }"#).unwrap();
        assert_eq!(tol.linear, 0.001);
        assert_eq!(tol.parametric, Tolerance::DEFAULT_PARAMETRIC);
    }
}
