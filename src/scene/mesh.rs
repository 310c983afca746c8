//! CPU-side geometry for the car parts.
//!
//! Every face gets its own vertices so normals stay flat, which is what a
//! low-poly model is supposed to look like. Triangles wind counter-clockwise
//! seen from outside.

use std::f32::consts::TAU;

use cgmath::{InnerSpace, Vector3};

use crate::scene::{
    car::{CarPart, Shape, rgb},
    transform::Transform,
};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    /// 1.0 for parts that skip lighting.
    pub unlit: f32,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3, 3 => Float32];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub type Triangle = [(Vector3<f32>, Vector3<f32>); 3];

fn quad(
    out: &mut Vec<Triangle>,
    center: Vector3<f32>,
    u: Vector3<f32>,
    v: Vector3<f32>,
    normal: Vector3<f32>,
) {
    let a = center - u - v;
    let b = center + u - v;
    let c = center + u + v;
    let d = center - u + v;
    out.push([(a, normal), (b, normal), (c, normal)]);
    out.push([(a, normal), (c, normal), (d, normal)]);
}

/// Axis-aligned box centred on the origin.
pub fn cuboid(size: [f32; 3]) -> Vec<Triangle> {
    let [hx, hy, hz] = size.map(|s| s * 0.5);
    let x = Vector3::unit_x();
    let y = Vector3::unit_y();
    let z = Vector3::unit_z();
    // (normal, u, v) with u x v == normal
    let faces = [
        (x * hx, y * hy, z * hz),
        (-x * hx, z * hz, y * hy),
        (y * hy, z * hz, x * hx),
        (-y * hy, x * hx, z * hz),
        (z * hz, x * hx, y * hy),
        (-z * hz, y * hy, x * hx),
    ];
    let mut out = Vec::with_capacity(12);
    for (offset, u, v) in faces {
        quad(&mut out, offset, u, v, offset.normalize());
    }
    out
}

/// Upright cylinder along y centred on the origin, with flat sides and caps.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> Vec<Triangle> {
    let segments = segments.max(3);
    let half = height * 0.5;
    let ring = |i: u32, y: f32| {
        let angle = TAU * i as f32 / segments as f32;
        Vector3::new(radius * angle.cos(), y, radius * angle.sin())
    };
    let up = Vector3::unit_y();
    let top = up * half;
    let bottom = -top;
    let mut out = Vec::with_capacity(segments as usize * 4);
    for i in 0..segments {
        let (b0, b1) = (ring(i, -half), ring(i + 1, -half));
        let (t0, t1) = (ring(i, half), ring(i + 1, half));
        let mid = TAU * (i as f32 + 0.5) / segments as f32;
        let side = Vector3::new(mid.cos(), 0.0, mid.sin());
        out.push([(b0, side), (t0, side), (t1, side)]);
        out.push([(b0, side), (t1, side), (b1, side)]);
        out.push([(top, up), (t1, up), (t0, up)]);
        out.push([(bottom, -up), (b0, -up), (b1, -up)]);
    }
    out
}

fn shape_triangles(shape: Shape) -> Vec<Triangle> {
    match shape {
        Shape::Box { size } => cuboid(size),
        Shape::Cylinder {
            radius,
            height,
            segments,
        } => cylinder(radius, height, segments),
    }
}

fn place(local: &Transform, triangles: Vec<Triangle>) -> impl Iterator<Item = Triangle> + '_ {
    let matrix = local.to_matrix();
    let normal_matrix = local.normal_matrix();
    triangles.into_iter().map(move |tri| {
        tri.map(|(p, n)| {
            let p = matrix * p.extend(1.0);
            (p.truncate(), (normal_matrix * n).normalize())
        })
    })
}

/// One triangle list for the whole car, in the car group's space.
pub fn build(parts: &[CarPart]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for part in parts {
        let color = rgb(part.color);
        let unlit = if part.unlit { 1.0 } else { 0.0 };
        for tri in place(&part.local, shape_triangles(part.shape)) {
            vertices.extend(tri.map(|(p, n)| Vertex {
                position: p.into(),
                normal: n.into(),
                color,
                unlit,
            }));
        }
    }
    vertices
}
