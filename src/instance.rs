//! Per-instance world transforms for instanced drawing.
//!
//! One record per particle slot (point sprites) or per constraint slot
//! (oriented segments), in insertion order. The renderer indexes by
//! position, so inactive slots are still written: as an all-zero transform
//! (every vertex collapses to the origin and nothing is rasterized) and with
//! `visible = 0` in the parallel flag buffer.

use crate::constraint::Constraint;
use crate::float::Float;
use crate::mat::{Mat4, Quat};
use crate::particle::Particle;
use crate::vec::{Axes, Vec, Vec3};
use alloc::vec::Vec as AllocVec;
use bytemuck::{Pod, Zeroable};

/// A column-major 4x4 transform as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    pub cols: [f32; 16],
}

impl InstanceTransform {
    pub fn from_mat4<F: Float>(m: &Mat4<F>) -> Self {
        InstanceTransform { cols: m.to_f32_cols_array() }
    }

    /// The hidden-instance transform.
    pub fn zero() -> Self {
        Self::zeroed()
    }

    pub fn is_zero(&self) -> bool {
        self.cols.iter().all(|&v| v == 0.0)
    }

    pub fn translation(&self) -> [f32; 3] {
        [self.cols[12], self.cols[13], self.cols[14]]
    }
}

/// Per-instance state for shaders: visibility and pointer highlight.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct InstanceFlags {
    pub visible: u32,
    pub selected: u32,
}

impl InstanceFlags {
    pub fn new(visible: bool, selected: bool) -> Self {
        InstanceFlags { visible: visible as u32, selected: selected as u32 }
    }
}

/// Transform and flag streams, reused across frames.
#[derive(Clone, Debug, Default)]
pub struct InstanceBuffer {
    transforms: AllocVec<InstanceTransform>,
    flags: AllocVec<InstanceFlags>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InstanceBuffer {
            transforms: AllocVec::with_capacity(capacity),
            flags: AllocVec::with_capacity(capacity),
        }
    }

    /// Drop the contents, keep the allocation.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.flags.clear();
    }

    pub fn push(&mut self, transform: InstanceTransform, flags: InstanceFlags) {
        self.transforms.push(transform);
        self.flags.push(flags);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    pub fn flags(&self) -> &[InstanceFlags] {
        &self.flags
    }

    /// The transform stream as 16 floats per instance.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.transforms)
    }

    /// The transform stream as raw bytes, ready for a buffer upload.
    pub fn transform_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transforms)
    }

    pub fn flag_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.flags)
    }

    pub fn visible_count(&self) -> usize {
        self.flags.iter().filter(|f| f.visible != 0).count()
    }
}

/// How a segment's rotation is derived from its direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentOrientation {
    /// `atan2` about +Z. Exact for scenes confined to the XY plane.
    Planar,
    /// Shortest-arc quaternion from the canonical axis. Works in 3D.
    Arc,
}

/// Builds instance streams from a world's particles and constraints.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InstanceBuilder<F: Float> {
    /// Uniform scale of a point sprite.
    pub point_size: F,
    /// Thickness of a segment quad.
    pub segment_width: F,
    pub orientation: SegmentOrientation,
    /// The unit mesh axis a segment's length runs along. Default +X.
    pub axis: Vec3<F>,
}

impl<F: Float> InstanceBuilder<F> {
    pub fn new(point_size: F, segment_width: F) -> Self {
        InstanceBuilder {
            point_size,
            segment_width,
            orientation: SegmentOrientation::Planar,
            axis: Vec3::unit_x(),
        }
    }

    /// Arc orientation from an arbitrary mesh axis.
    pub fn with_arc_orientation(mut self, axis: Vec3<F>) -> Self {
        self.orientation = SegmentOrientation::Arc;
        self.axis = axis;
        self
    }

    /// `translate(position) * scale(point_size)`.
    pub fn point_transform(&self, position: Vec3<F>) -> Mat4<F> {
        Mat4::from_scale_rotation_translation(
            Vec3::new(self.point_size, self.point_size, F::one()),
            Quat::identity(),
            position,
        )
    }

    /// `translate(midpoint) * rotation * scale(length, width, 1)`.
    pub fn segment_transform(&self, a: Vec3<F>, b: Vec3<F>) -> Mat4<F> {
        let midpoint = a.midpoint(b);
        let delta = a - b;
        let length = delta.length();
        let rotation = match self.orientation {
            SegmentOrientation::Planar => Quat::from_rotation_z(F::atan2(delta.y, delta.x)),
            SegmentOrientation::Arc => Quat::from_rotation_arc(self.axis, delta),
        };
        Mat4::from_scale_rotation_translation(
            Vec3::new(length, self.segment_width, F::one()),
            rotation,
            midpoint,
        )
    }

    /// One point instance per particle slot.
    pub fn build_points<V: Axes<Scalar = F>>(&self, particles: &[Particle<V>], out: &mut InstanceBuffer) {
        out.clear();
        for p in particles {
            if p.active {
                let m = self.point_transform(p.pos.to_vec3());
                out.push(InstanceTransform::from_mat4(&m), InstanceFlags::new(true, p.selected));
            } else {
                out.push(InstanceTransform::zero(), InstanceFlags::new(false, false));
            }
        }
    }

    /// One segment instance per constraint slot.
    pub fn build_segments<V: Axes<Scalar = F>>(
        &self,
        particles: &[Particle<V>],
        constraints: &[Constraint<V>],
        out: &mut InstanceBuffer,
    ) {
        out.clear();
        for c in constraints {
            if c.active {
                let a = particles[c.a].pos.to_vec3();
                let b = particles[c.b].pos.to_vec3();
                let m = self.segment_transform(a, b);
                out.push(InstanceTransform::from_mat4(&m), InstanceFlags::new(true, c.selected));
            } else {
                out.push(InstanceTransform::zero(), InstanceFlags::new(false, false));
            }
        }
    }
}

impl<F: Float> Default for InstanceBuilder<F> {
    fn default() -> Self {
        Self::new(F::from_f32(4.0), F::one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_is_translate_times_scale() {
        let b = InstanceBuilder::new(3.0f32, 1.0);
        let t = InstanceTransform::from_mat4(&b.point_transform(Vec3::new(5.0, -2.0, 0.0)));
        assert_eq!(t.cols[0], 3.0);
        assert_eq!(t.cols[5], 3.0);
        assert_eq!(t.cols[10], 1.0);
        assert_eq!(t.translation(), [5.0, -2.0, 0.0]);
    }

    #[test]
    fn segment_spans_its_endpoints() {
        let b = InstanceBuilder::new(1.0f32, 2.0);
        let a = Vec3::new(0.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 10.0, 0.0);
        let m = b.segment_transform(a, c);
        // the unit mesh runs from -0.5 to 0.5 along +X
        let end0 = m.transform_point(Vec3::new(0.5, 0.0, 0.0));
        let end1 = m.transform_point(Vec3::new(-0.5, 0.0, 0.0));
        assert!((end0 - a).length() < 1e-4);
        assert!((end1 - c).length() < 1e-4);
    }

    #[test]
    fn planar_and_arc_agree_in_plane() {
        let planar = InstanceBuilder::new(1.0f32, 2.0);
        let arc = planar.with_arc_orientation(Vec3::unit_x());
        let a = Vec3::new(3.0, 1.0, 0.0);
        let c = Vec3::new(-4.0, 7.5, 0.0);
        let mp = planar.segment_transform(a, c);
        let ma = arc.segment_transform(a, c);
        for (x, y) in mp.m.iter().zip(ma.m.iter()) {
            assert!((x - y).abs() < 1e-4);
        }
    }

    #[test]
    fn bytes_are_sixty_four_per_instance() {
        let mut buf = InstanceBuffer::new();
        buf.push(InstanceTransform::zero(), InstanceFlags::default());
        buf.push(InstanceTransform::zero(), InstanceFlags::new(true, false));
        assert_eq!(buf.transform_bytes().len(), 128);
        assert_eq!(buf.as_floats().len(), 32);
        assert_eq!(buf.flag_bytes().len(), 16);
        assert_eq!(buf.visible_count(), 1);
    }
}
