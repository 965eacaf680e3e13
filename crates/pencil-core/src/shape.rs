//! Drawable shape geometry.
//!
//! A `Shape` holds the immutable geometric parameters of a binding; once a
//! rigid body is created from it, the body pose is the only thing that
//! changes. The variant set is closed on purpose so hit-testing and
//! rendering can match exhaustively.

use serde::{Deserialize, Serialize};

/// Geometry rejected at spawn time. The offending spawn is aborted and no
/// body is created; existing bindings are untouched.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeometryError {
    #[error("circle radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("box half-extents must be positive, got [{0}, {1}]")]
    DegenerateBox(f32, f32),
    #[error("polyline needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("shape contains a non-finite coordinate")]
    NonFinite,
}

/// Shape definition with world-space placement parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle {
        center: [f32; 2],
        radius: f32,
    },
    Box {
        center: [f32; 2],
        half_extents: [f32; 2],
    },
    /// Open vertex chain. Always simulated as a fixed body (walls, sketched
    /// obstacles); never hit-testable or draggable.
    Polyline {
        vertices: Vec<[f32; 2]>,
    },
}

impl Shape {
    pub fn circle(center: [f32; 2], radius: f32) -> Self {
        Self::Circle { center, radius }
    }

    pub fn rect(center: [f32; 2], half_extents: [f32; 2]) -> Self {
        Self::Box {
            center,
            half_extents,
        }
    }

    pub fn polyline(vertices: Vec<[f32; 2]>) -> Self {
        Self::Polyline { vertices }
    }

    /// Checks the geometric parameters before any body is created.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        match self {
            Self::Circle { radius, .. } => {
                if *radius <= 0.0 {
                    return Err(GeometryError::NonPositiveRadius(*radius));
                }
            }
            Self::Box { half_extents, .. } => {
                if half_extents[0] <= 0.0 || half_extents[1] <= 0.0 {
                    return Err(GeometryError::DegenerateBox(
                        half_extents[0],
                        half_extents[1],
                    ));
                }
            }
            Self::Polyline { vertices } => {
                if vertices.len() < 2 {
                    return Err(GeometryError::TooFewVertices(vertices.len()));
                }
            }
        }
        Ok(())
    }

    fn is_finite(&self) -> bool {
        match self {
            Self::Circle { center, radius } => {
                center.iter().all(|c| c.is_finite()) && radius.is_finite()
            }
            Self::Box {
                center,
                half_extents,
            } => center
                .iter()
                .chain(half_extents.iter())
                .all(|c| c.is_finite()),
            Self::Polyline { vertices } => {
                vertices.iter().flatten().all(|c| c.is_finite())
            }
        }
    }

    /// Hit test in the body-local frame, where the shape is centred at the
    /// origin. Boundary points count as contained. Polylines have no
    /// interior and always miss.
    pub fn contains_local(&self, point: [f32; 2]) -> bool {
        match self {
            Self::Circle { radius, .. } => {
                point[0] * point[0] + point[1] * point[1] <= radius * radius
            }
            Self::Box { half_extents, .. } => {
                point[0].abs() <= half_extents[0] && point[1].abs() <= half_extents[1]
            }
            Self::Polyline { .. } => false,
        }
    }

    /// World-space position the backing body is created at. Polylines keep
    /// their vertices world-space and sit on a body at the origin.
    pub fn spawn_translation(&self) -> [f32; 2] {
        match self {
            Self::Circle { center, .. } | Self::Box { center, .. } => *center,
            Self::Polyline { .. } => [0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_degenerate_geometry() {
        assert_eq!(
            Shape::circle([0.0, 0.0], 0.0).validate(),
            Err(GeometryError::NonPositiveRadius(0.0))
        );
        assert_eq!(
            Shape::circle([0.0, 0.0], -1.0).validate(),
            Err(GeometryError::NonPositiveRadius(-1.0))
        );
        assert_eq!(
            Shape::rect([0.0, 0.0], [1.0, 0.0]).validate(),
            Err(GeometryError::DegenerateBox(1.0, 0.0))
        );
        assert_eq!(
            Shape::polyline(vec![[0.0, 0.0]]).validate(),
            Err(GeometryError::TooFewVertices(1))
        );
        assert_eq!(
            Shape::circle([f32::NAN, 0.0], 1.0).validate(),
            Err(GeometryError::NonFinite)
        );
    }

    #[test]
    fn test_validate_accepts_valid_geometry() {
        assert!(Shape::circle([-5.0, 7.0], 0.5).validate().is_ok());
        assert!(Shape::rect([5.0, 2.0], [0.9, 0.9]).validate().is_ok());
        assert!(
            Shape::polyline(vec![[-8.0, 9.0], [-8.0, 0.0], [8.0, 0.0]])
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_circle_contains_boundary_inclusive() {
        let circle = Shape::circle([3.0, 3.0], 0.5);
        assert!(circle.contains_local([0.0, 0.0]));
        assert!(circle.contains_local([0.5, 0.0]));
        assert!(!circle.contains_local([0.51, 0.0]));
    }

    #[test]
    fn test_box_contains_boundary_inclusive() {
        let rect = Shape::rect([0.0, 0.0], [1.2, 0.6]);
        assert!(rect.contains_local([0.0, 0.0]));
        assert!(rect.contains_local([1.2, 0.6]));
        assert!(rect.contains_local([-1.2, -0.6]));
        assert!(!rect.contains_local([1.21, 0.0]));
        assert!(!rect.contains_local([0.0, 0.61]));
    }

    #[test]
    fn test_polyline_never_contains() {
        let line = Shape::polyline(vec![[0.0, 0.0], [1.0, 0.0]]);
        assert!(!line.contains_local([0.5, 0.0]));
    }

    #[test]
    fn test_shape_json_roundtrip() {
        let shape = Shape::rect([5.0, 2.0], [0.9, 0.9]);
        let json = serde_json::to_string(&shape).expect("serializes");
        let back: Shape = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(shape, back);
    }
}
