use std::fmt;

use voxnav_core::{Aabb, Vec3};

use crate::request::MAX_AGENT_SIZE;

/// Requests the search refuses to run. These are caller bugs; a missing
/// route is never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// The agent box is larger than [`MAX_AGENT_SIZE`] along some axis.
    OversizedAgent { size: Vec3 },
    /// The agent box has an inverted or NaN extent.
    InvalidAgentBox(Aabb),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OversizedAgent { size } => write!(
                f,
                "agent box {size} exceeds {MAX_AGENT_SIZE} blocks; \
                 the search is not built for agents this large"
            ),
            Self::InvalidAgentBox(b) => write!(f, "agent box {b} has an inverted extent"),
        }
    }
}

impl std::error::Error for PathError {}

/// Check an agent box before any search work is done.
pub(crate) fn validate_agent_box(agent_box: &Aabb) -> Result<(), PathError> {
    if agent_box.is_inverted() {
        return Err(PathError::InvalidAgentBox(*agent_box));
    }
    if agent_box.max_extent() > MAX_AGENT_SIZE {
        return Err(PathError::OversizedAgent {
            size: agent_box.size(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normal_agent() {
        assert!(validate_agent_box(&Aabb::centered(0.6, 1.8)).is_ok());
        assert!(validate_agent_box(&Aabb::centered(100.0, 2.0)).is_ok());
    }

    #[test]
    fn rejects_oversized_agent() {
        let err = validate_agent_box(&Aabb::centered(0.6, 140.0)).unwrap_err();
        assert!(matches!(err, PathError::OversizedAgent { .. }));
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn rejects_inverted_agent() {
        let b = Aabb {
            min: Vec3::new(0.0, 2.0, 0.0),
            max: Vec3::new(1.0, 0.0, 1.0),
        };
        assert_eq!(validate_agent_box(&b), Err(PathError::InvalidAgentBox(b)));
    }
}
