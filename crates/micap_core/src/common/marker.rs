use crate::{Error, Result};
use nalgebra as na;

/// One tracked optical marker of a rigid body's cluster, sampled at the
/// alignment reference frame. `position` is `None` when the marker dropped
/// out of tracking on that frame.
#[derive(Clone, Debug)]
pub struct Marker {
    pub name: String,
    pub position: Option<na::Point3<f32>>,
}

impl Marker {
    pub fn new(name: impl Into<String>, position: na::Point3<f32>) -> Self {
        Self {
            name: name.into(),
            position: Some(position),
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
        }
    }
}

/// The ordered marker cluster defining a rigid body's reference frame.
///
/// Caller contract: the ordering is meaningful and must match the convention
/// the upstream tracker used to derive the rigid-body orientation (clockwise
/// for planar clusters). That winding cannot be verified from a single
/// correspondence, so it is trusted, never corrected.
#[derive(Clone, Debug, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// World position of the marker at `index`, failing when the index is
    /// out of range or the marker has no sample at the reference frame.
    pub fn position(&self, index: usize) -> Result<na::Point3<f32>> {
        let marker = self.markers.get(index).ok_or_else(|| {
            Error::Correspondence(format!(
                "marker index {index} is out of range (cluster has {} markers)",
                self.markers.len()
            ))
        })?;
        marker.position.ok_or_else(|| {
            Error::Correspondence(format!("marker '{}' has no sample at the reference frame", marker.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn position_lookup() {
        let markers = MarkerSet::new(vec![
            Marker::new("frog", na::Point3::new(0.1, 0.2, 0.3)),
            Marker::missing("tip"),
        ]);
        assert_eq!(markers.position(0).unwrap(), na::Point3::new(0.1, 0.2, 0.3));
        assert!(matches!(markers.position(1), Err(Error::Correspondence(_))));
        assert!(matches!(markers.position(5), Err(Error::Correspondence(_))));
    }
}
