//! The low-poly car shown in the hero.

use crate::scene::transform::Transform;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Width (x), height (y), depth (z).
    Box { size: [f32; 3] },
    /// Upright cylinder along y.
    Cylinder {
        radius: f32,
        height: f32,
        segments: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarPart {
    pub name: &'static str,
    pub shape: Shape,
    pub color: u32,
    /// Unlit parts ignore the light rig and show their colour as is. The hero
    /// car is flat-coloured throughout.
    pub unlit: bool,
    /// Placement inside the car group.
    pub local: Transform,
}

pub const WHEEL_OFFSETS: [[f32; 3]; 4] = [
    [-1.3, 0.4, 1.2],
    [1.3, 0.4, 1.2],
    [-1.3, 0.4, -1.2],
    [1.3, 0.4, -1.2],
];

/// Body, roof, four wheels and the two neon strips.
pub fn parts() -> Vec<CarPart> {
    let mut parts = vec![
        CarPart {
            name: "body",
            shape: Shape::Box {
                size: [4.0, 1.0, 2.0],
            },
            color: 0x1a1a1a,
            unlit: true,
            local: Transform::at(0.0, 0.5, 0.0),
        },
        CarPart {
            name: "roof",
            shape: Shape::Box {
                size: [2.5, 0.8, 1.8],
            },
            color: 0x0a0a0a,
            unlit: true,
            local: Transform::at(0.0, 1.4, 0.0),
        },
    ];
    parts.extend(WHEEL_OFFSETS.iter().map(|&[x, y, z]| CarPart {
        name: "wheel",
        shape: Shape::Cylinder {
            radius: 0.4,
            height: 0.3,
            segments: 6,
        },
        color: 0x2a2a2a,
        unlit: true,
        local: Transform::at(x, y, z).rotated_z_deg(90.0),
    }));
    parts.extend([1.05, -1.05].map(|z| CarPart {
        name: "neon",
        shape: Shape::Box {
            size: [4.2, 0.1, 0.1],
        },
        color: 0x00ffff,
        unlit: true,
        local: Transform::at(0.0, 0.2, z),
    }));
    parts
}

/// `0xRRGGBB` to float RGB.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
