#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pointer picking for the interactable room scene.
//!
//! A pointer position is normalised into device space, unprojected into a
//! world-space [`Ray`] through the [`Camera`], and handed to a [`RayCaster`]
//! that reports the nearest intersection below the interactable root. Picking
//! never mutates the scene, and picking against a root that is still loading
//! yields no hit.

use gift_hunt_core::{AssetSlot, HitResult, WorldPoint};
use glam::{Mat4, Vec2, Vec3};

const DEFAULT_FOVY_DEGREES: f32 = 50.0;
const DEFAULT_ZNEAR: f32 = 0.1;
const DEFAULT_ZFAR: f32 = 5_000.0;

/// Dimensions of the surface receiving pointer input, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width of the surface.
    pub width: f32,
    /// Height of the surface.
    pub height: f32,
}

impl Viewport {
    /// Creates a new viewport description.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or `None` for a degenerate surface.
    #[must_use]
    pub fn aspect(&self) -> Option<f32> {
        if self.width > 0.0 && self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }

    /// Converts a pointer position into normalised device coordinates.
    ///
    /// The vertical axis is inverted so that the top edge maps to `+1`.
    #[must_use]
    pub fn to_ndc(&self, pointer: Vec2) -> Option<Vec2> {
        let _ = self.aspect()?;
        Some(Vec2::new(
            2.0 * pointer.x / self.width - 1.0,
            1.0 - 2.0 * pointer.y / self.height,
        ))
    }
}

/// Right-handed perspective camera looking at a target point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up direction used to orient the view.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Width divided by height of the projection.
    pub aspect: f32,
    /// Distance to the near clipping plane.
    pub znear: f32,
    /// Distance to the far clipping plane.
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(750.0, 480.0, 1_250.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: DEFAULT_FOVY_DEGREES.to_radians(),
            aspect: 1.0,
            znear: DEFAULT_ZNEAR,
            zfar: DEFAULT_ZFAR,
        }
    }
}

impl Camera {
    /// Returns a copy of the camera whose projection matches the viewport.
    #[must_use]
    pub fn fitted_to(mut self, viewport: Viewport) -> Self {
        if let Some(aspect) = viewport.aspect() {
            self.aspect = aspect;
        }
        self
    }

    /// Combined projection and view transform.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let projection = Mat4::perspective_rh_gl(self.fovy, self.aspect, self.znear, self.zfar);
        projection * view
    }

    /// Builds the world-space ray passing through the device-space point.
    ///
    /// Returns `None` when the view-projection transform is singular.
    #[must_use]
    pub fn ray_through(&self, ndc: Vec2) -> Option<Ray> {
        let view_projection = self.view_projection();
        if view_projection.determinant().abs() <= f32::EPSILON * f32::EPSILON {
            return None;
        }
        let inverse = view_projection.inverse();
        let near = inverse.project_point3(ndc.extend(-1.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        let direction = (far - near).try_normalize()?;
        Some(Ray::new(near, direction))
    }
}

/// World-space ray used for intersection tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin on the near clipping plane.
    pub origin: Vec3,
    /// Unit direction of travel.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray, normalising the direction.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point along the ray at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two opposite corners in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box centred on `center` with the provided full extents.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Ray parameter of the first intersection, if the ray meets the box.
    ///
    /// A ray starting inside the box reports the exit point.
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inverse = ray.direction.recip();
        let t0 = (self.min - ray.origin) * inverse;
        let t1 = (self.max - ray.origin) * inverse;

        let near = t0.min(t1).max_element();
        let far = t0.max(t1).min_element();

        if near.is_nan() || far.is_nan() || near > far || far < 0.0 {
            return None;
        }
        Some(if near >= 0.0 { near } else { far })
    }
}

/// Named node of the interactable scene graph.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    name: String,
    bounds: Option<Aabb>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates a grouping node without geometry of its own.
    #[must_use]
    pub fn group(name: impl Into<String>, children: Vec<SceneNode>) -> Self {
        Self {
            name: name.into(),
            bounds: None,
            children,
        }
    }

    /// Creates a leaf mesh occupying the provided world-space bounds.
    #[must_use]
    pub fn mesh(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            bounds: Some(bounds),
            children: Vec::new(),
        }
    }

    /// Name exported with the model.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World-space bounds of the node's own geometry.
    #[must_use]
    pub const fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Direct descendants of the node.
    #[must_use]
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Visits the node and all descendants in depth-first order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SceneNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Intersection reported by a ray caster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection<'scene> {
    /// Node whose geometry the ray met.
    pub node: &'scene SceneNode,
    /// Ray parameter of the intersection.
    pub distance: f32,
    /// World-space intersection point.
    pub point: Vec3,
}

/// Capability that intersects a ray with a scene graph.
pub trait RayCaster {
    /// Returns the nearest intersection with the root or any of its descendants.
    fn cast_ray<'scene>(&self, ray: &Ray, root: &'scene SceneNode)
        -> Option<Intersection<'scene>>;
}

/// Ray caster that tests the world-space bounds of every node.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundsRayCaster;

impl RayCaster for BoundsRayCaster {
    fn cast_ray<'scene>(
        &self,
        ray: &Ray,
        root: &'scene SceneNode,
    ) -> Option<Intersection<'scene>> {
        let mut nearest: Option<Intersection<'scene>> = None;
        root.walk(&mut |node| {
            let Some(distance) = node
                .bounds()
                .and_then(|bounds| bounds.intersect_ray(ray))
            else {
                return;
            };
            if nearest.map_or(true, |current| distance < current.distance) {
                nearest = Some(Intersection {
                    node,
                    distance,
                    point: ray.point_at(distance),
                });
            }
        });
        nearest
    }
}

/// Pointer picker parameterised over the ray casting capability.
#[derive(Clone, Debug, Default)]
pub struct Picker<C = BoundsRayCaster> {
    caster: C,
}

impl<C: RayCaster> Picker<C> {
    /// Creates a picker that delegates intersection tests to `caster`.
    #[must_use]
    pub const fn new(caster: C) -> Self {
        Self { caster }
    }

    /// Picks the nearest interactable object under the pointer.
    pub fn pick(
        &self,
        pointer: Vec2,
        viewport: Viewport,
        camera: &Camera,
        root: &AssetSlot<SceneNode>,
    ) -> Option<HitResult> {
        let Some(root) = root.loaded() else {
            log::debug!("pick ignored: interactable root is still loading");
            return None;
        };
        let ndc = viewport.to_ndc(pointer)?;
        let ray = camera.ray_through(ndc)?;
        let hit = self.caster.cast_ray(&ray, root)?;
        log::debug!(
            "picked `{}` at distance {:.2}",
            hit.node.name(),
            hit.distance
        );
        Some(HitResult::new(
            hit.node.name(),
            WorldPoint::new(hit.point.x, hit.point.y, hit.point.z),
        ))
    }
}
