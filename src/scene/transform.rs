//! Position, rotation and scale of scene objects.

use std::ops::Mul;

use cgmath::{Deg, One, Rad, Rotation3};

/// Affine transform stored as its components; rotation as a quaternion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Transform {
    /// Identity transform.
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: cgmath::Vector3::new(x, y, z),
            ..Self::new()
        }
    }

    pub fn rotated_z(mut self, angle: impl Into<Rad<f32>>) -> Self {
        self.rotation = cgmath::Quaternion::from_angle_z(angle) * self.rotation;
        self
    }

    pub fn rotated_z_deg(self, degrees: f32) -> Self {
        self.rotated_z(Deg(degrees))
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Rotation part for transforming normals; exact while scale is uniform.
    pub fn normal_matrix(&self) -> cgmath::Matrix3<f32> {
        cgmath::Matrix3::from(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Parent-child composition: `parent * child` places `child` in the parent's space.
impl Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Self::Output {
        let scaled = cgmath::Vector3::new(
            self.scale.x * rhs.position.x,
            self.scale.y * rhs.position.y,
            self.scale.z * rhs.position.z,
        );
        Transform {
            position: self.position + self.rotation * scaled,
            rotation: self.rotation * rhs.rotation,
            scale: cgmath::Vector3::new(
                self.scale.x * rhs.scale.x,
                self.scale.y * rhs.scale.y,
                self.scale.z * rhs.scale.z,
            ),
        }
    }
}
