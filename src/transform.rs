use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Euler rotation in degrees, in the host's pitch/yaw/roll convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator { pitch: 0.0, yaw: 0.0, roll: 0.0 };

    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub location: DVec3,
    pub rotation: Rotator,
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self { location: DVec3::ZERO, rotation: Rotator::ZERO, scale: DVec3::ONE }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Vec3Data {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<DVec3> for Vec3Data {
    fn from(value: DVec3) -> Self {
        Self { x: value.x, y: value.y, z: value.z }
    }
}

impl From<Vec3Data> for DVec3 {
    fn from(value: Vec3Data) -> Self {
        DVec3::new(value.x, value.y, value.z)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformData {
    pub location: Vec3Data,
    pub rotation: Rotator,
    pub scale: Vec3Data,
}

impl Default for TransformData {
    fn default() -> Self {
        TransformData::from(Transform::default())
    }
}

impl From<Transform> for TransformData {
    fn from(value: Transform) -> Self {
        Self { location: value.location.into(), rotation: value.rotation, scale: value.scale.into() }
    }
}

impl From<TransformData> for Transform {
    fn from(value: TransformData) -> Self {
        Self { location: value.location.into(), rotation: value.rotation, scale: value.scale.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl VectorPatch {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    pub fn resolve_over(&self, base: DVec3) -> DVec3 {
        DVec3::new(self.x.unwrap_or(base.x), self.y.unwrap_or(base.y), self.z.unwrap_or(base.z))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatorPatch {
    pub pitch: Option<f64>,
    pub yaw: Option<f64>,
    pub roll: Option<f64>,
}

impl RotatorPatch {
    pub fn is_empty(&self) -> bool {
        self.pitch.is_none() && self.yaw.is_none() && self.roll.is_none()
    }

    pub fn resolve_over(&self, base: Rotator) -> Rotator {
        Rotator {
            pitch: self.pitch.unwrap_or(base.pitch),
            yaw: self.yaw.unwrap_or(base.yaw),
            roll: self.roll.unwrap_or(base.roll),
        }
    }
}

/// Partial placement. An absent field means "default" at spawn time and "unchanged" on update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformPatch {
    pub location: Option<VectorPatch>,
    pub rotation: Option<RotatorPatch>,
    pub scale: Option<VectorPatch>,
}

impl TransformPatch {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    pub fn resolve_for_spawn(&self) -> Transform {
        self.resolve_over(&Transform::default())
    }

    pub fn resolve_over(&self, current: &Transform) -> Transform {
        Transform {
            location: self.location.map_or(current.location, |patch| patch.resolve_over(current.location)),
            rotation: self.rotation.map_or(current.rotation, |patch| patch.resolve_over(current.rotation)),
            scale: self.scale.map_or(current.scale, |patch| patch.resolve_over(current.scale)),
        }
    }
}
