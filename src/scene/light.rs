use crate::scene::car::rgb;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
    /// Distance at which a point light has faded out; unused for directional lights.
    pub range: f32,
}

/// Ambient fill, one key light and two coloured accents.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: (u32, f32),
    pub directional: Light,
    pub points: [Light; 2],
}

impl LightRig {
    pub fn hero() -> Self {
        Self {
            ambient: (0x404040, 0.6),
            directional: Light {
                color: 0xffffff,
                intensity: 1.0,
                position: [10.0, 10.0, 5.0],
                range: 0.0,
            },
            points: [
                Light {
                    color: 0x00ffff,
                    intensity: 0.8,
                    position: [-5.0, 3.0, 5.0],
                    range: 100.0,
                },
                Light {
                    color: 0x0080ff,
                    intensity: 0.6,
                    position: [5.0, 3.0, -5.0],
                    range: 100.0,
                },
            ],
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        let (ambient, strength) = self.ambient;
        let [r, g, b] = rgb(ambient);
        LightUniform {
            ambient: [r * strength, g * strength, b * strength, 1.0],
            directional: self.directional.into(),
            points: self.points.map(Into::into),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRaw {
    position: [f32; 3],
    // packs into the padding a vec3 leaves in a uniform
    intensity: f32,
    color: [f32; 3],
    range: f32,
}

impl From<Light> for LightRaw {
    fn from(light: Light) -> Self {
        Self {
            position: light.position,
            intensity: light.intensity,
            color: rgb(light.color),
            range: light.range,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    ambient: [f32; 4],
    directional: LightRaw,
    points: [LightRaw; 2],
}
