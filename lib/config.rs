//! Serializable description of a basis.
//!
//! ```
//! use ecspline::config::BasisConfig;
//!
//! let config: BasisConfig = serde_json::from_str(r#"{
//!     "order": 5,
//!     "num_nodes": 41,
//!     "x_min": 0.0,
//!     "x_max": 40.0,
//!     "node_sequence": "Exponential",
//!     "parameter": 2.5,
//!     "ecs_r0": 0.8,
//!     "ecs_theta": 0.35,
//!     "skip_first": true
//! }"#).unwrap();
//! let basis = config.build().unwrap();
//! assert_eq!(basis.get_num_bsplines(), 43);
//! ```

use serde::{ Deserialize, Serialize };
use crate::{
    bspline::{ BasisResult, BSpline },
    ecs::Ecs,
    sequence::Sequence,
};

/// Parameters of a [`BSpline`] basis in flat, human-editable form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisConfig {
    /// Spline order (polynomial degree + 1).
    pub order: usize,
    /// Number of grid nodes.
    pub num_nodes: usize,
    /// First grid node.
    pub x_min: f64,
    /// Last grid node (for most sequences).
    pub x_max: f64,
    /// Name of the node distribution; see [`Sequence::from_name`].
    pub node_sequence: String,
    /// Shape parameter of the node distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<f64>,
    /// ECS rotation point as a fraction of the grid extent; no rotation if
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecs_r0: Option<f64>,
    /// ECS rotation angle; zero if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecs_theta: Option<f64>,
    /// Exclude the first B-spline from the degrees of freedom.
    #[serde(default)]
    pub skip_first: bool,
    /// Exclude the last B-spline from the degrees of freedom.
    #[serde(default)]
    pub skip_last: bool,
}

impl BasisConfig {
    /// Parse the node distribution.
    pub fn sequence(&self) -> BasisResult<Sequence> {
        Sequence::from_name(&self.node_sequence, self.parameter)
    }

    /// Collect the ECS parameters.
    pub fn ecs(&self) -> Ecs {
        Ecs {
            r0: self.ecs_r0.unwrap_or(1.0),
            theta: self.ecs_theta.unwrap_or(0.0),
        }
    }

    /// Construct the described basis.
    pub fn build(&self) -> BasisResult<BSpline> {
        let mut basis = BSpline::new(
            self.order,
            self.num_nodes,
            self.x_min,
            self.x_max,
            self.sequence()?,
            self.ecs(),
        )?;
        basis.set_skip_first(self.skip_first);
        basis.set_skip_last(self.skip_last);
        Ok(basis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BasisError;

    fn parse(json: &str) -> BasisConfig { serde_json::from_str(json).unwrap() }

    #[test]
    fn minimal_config() {
        let config = parse(r#"{
            "order": 4,
            "num_nodes": 11,
            "x_min": 0.0,
            "x_max": 10.0,
            "node_sequence": "linear"
        }"#);
        assert_eq!(config.sequence().unwrap(), Sequence::Linear);
        assert_eq!(config.ecs(), Ecs::none());
        assert!(!config.skip_first && !config.skip_last);
        let basis = config.build().unwrap();
        assert_eq!(basis.get_num_bsplines(), 13);
        assert_eq!(*basis.get_contour(), crate::ecs::Contour::identity());
    }

    #[test]
    fn full_config() {
        let config = parse(r#"{
            "order": 6,
            "num_nodes": 21,
            "x_min": 0.0,
            "x_max": 20.0,
            "node_sequence": "PARABOLIC",
            "parameter": 4.0,
            "ecs_r0": 0.75,
            "ecs_theta": 0.5,
            "skip_first": true,
            "skip_last": true
        }"#);
        assert_eq!(config.sequence().unwrap(), Sequence::ParabolicLinear(4.0));
        let basis = config.build().unwrap();
        assert_eq!(basis.get_num_bsplines(), 20 + 5 - 2);
        assert_eq!(basis.get_contour().theta(), 0.5);
        assert!(basis.get_contour().r0() <= 15.0);
    }

    #[test]
    fn bad_configs() {
        let mut config = parse(r#"{
            "order": 4,
            "num_nodes": 11,
            "x_min": 0.0,
            "x_max": 10.0,
            "node_sequence": "chebyshev"
        }"#);
        assert!(matches!(config.build(), Err(BasisError::UnknownSequence(_))));
        config.node_sequence = "sinlike".into();
        assert!(matches!(config.build(), Err(BasisError::MissingParameter(_))));
        config.parameter = Some(1.0);
        assert!(config.build().is_ok());
        config.ecs_r0 = Some(1.5);
        assert!(matches!(config.build(), Err(BasisError::BadEcsR0(_))));
    }

    #[test]
    fn round_trip_omits_defaults() {
        let config = parse(r#"{
            "order": 3,
            "num_nodes": 5,
            "x_min": 1.0,
            "x_max": 2.0,
            "node_sequence": "linear"
        }"#);
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("ecs_r0"));
        assert_eq!(parse(&json), config);
    }
}
