use gift_hunt_core::{AssetSlot, HitResult};
use gift_hunt_system_picker::{
    Aabb, Camera, Intersection, Picker, Ray, RayCaster, SceneNode, Viewport,
};
use glam::{Vec2, Vec3};
use std::{cell::Cell, rc::Rc};

const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);
const CENTER: Vec2 = Vec2::new(400.0, 300.0);

fn front_camera() -> Camera {
    Camera {
        eye: Vec3::new(0.0, 0.0, 10.0),
        target: Vec3::ZERO,
        ..Camera::default()
    }
    .fitted_to(VIEWPORT)
}

fn stacked_room() -> SceneNode {
    SceneNode::group(
        "group_0",
        vec![
            SceneNode::mesh(
                "Wall__3_",
                Aabb::new(Vec3::new(-10.0, -10.0, -2.0), Vec3::new(10.0, 10.0, -1.0)),
            ),
            SceneNode::group(
                "sofa_group",
                vec![SceneNode::mesh(
                    "sofa_cushion",
                    Aabb::new(Vec3::new(-1.0, -1.0, 3.0), Vec3::new(1.0, 1.0, 4.0)),
                )],
            ),
        ],
    )
}

#[test]
fn nearest_descendant_wins() {
    let picker: Picker = Picker::default();
    let hit = picker
        .pick(CENTER, VIEWPORT, &front_camera(), &AssetSlot::Loaded(stacked_room()))
        .expect("centre ray hits the sofa");

    assert_eq!(hit.object_id, "sofa_cushion");
    assert!((hit.world_point.z - 4.0).abs() < 1e-2);
    assert!(hit.world_point.x.abs() < 1e-2);
}

#[test]
fn off_centre_pointer_reaches_farther_objects() {
    let picker: Picker = Picker::default();
    let hit = picker
        .pick(
            Vec2::new(40.0, 300.0),
            VIEWPORT,
            &front_camera(),
            &AssetSlot::Loaded(stacked_room()),
        )
        .expect("left edge ray hits the back wall");

    assert_eq!(hit.object_id, "Wall__3_");
    assert!(hit.world_point.x < -1.0, "hit lies to the left: {hit:?}");
}

#[test]
fn pending_root_yields_no_hit() {
    let picker: Picker = Picker::default();
    assert_eq!(
        picker.pick(CENTER, VIEWPORT, &front_camera(), &AssetSlot::Pending),
        None
    );
}

#[test]
fn empty_space_yields_no_hit() {
    let picker: Picker = Picker::default();
    let root = AssetSlot::Loaded(SceneNode::group("group_0", Vec::new()));
    assert_eq!(picker.pick(CENTER, VIEWPORT, &front_camera(), &root), None);
}

#[test]
fn degenerate_viewport_yields_no_hit() {
    let picker: Picker = Picker::default();
    let root = AssetSlot::Loaded(stacked_room());
    assert_eq!(
        picker.pick(CENTER, Viewport::new(0.0, 0.0), &front_camera(), &root),
        None
    );
}

#[test]
fn picking_leaves_the_scene_untouched() {
    let picker: Picker = Picker::default();
    let root = AssetSlot::Loaded(stacked_room());
    let before = root.clone();
    let _ = picker.pick(CENTER, VIEWPORT, &front_camera(), &root);
    assert_eq!(root, before);
}

#[derive(Clone, Default)]
struct CountingCaster {
    casts: Rc<Cell<u32>>,
}

impl RayCaster for CountingCaster {
    fn cast_ray<'scene>(
        &self,
        ray: &Ray,
        root: &'scene SceneNode,
    ) -> Option<Intersection<'scene>> {
        self.casts.set(self.casts.get() + 1);
        Some(Intersection {
            node: root,
            distance: 1.0,
            point: ray.point_at(1.0),
        })
    }
}

#[test]
fn picker_delegates_to_ray_caster() {
    let caster = CountingCaster::default();
    let casts = Rc::clone(&caster.casts);
    let picker = Picker::new(caster);
    let root = AssetSlot::Loaded(SceneNode::group("group_0", Vec::new()));

    let hit: Option<HitResult> = picker.pick(CENTER, VIEWPORT, &front_camera(), &root);
    assert_eq!(hit.map(|hit| hit.object_id), Some("group_0".to_owned()));

    let _ = picker.pick(CENTER, VIEWPORT, &front_camera(), &AssetSlot::Pending);
    assert_eq!(casts.get(), 1, "pending roots must not reach the ray caster");
}

#[test]
fn groups_carry_no_bounds_of_their_own() {
    let room = stacked_room();
    assert_eq!(room.bounds(), None);

    let names: Vec<&str> = room.children().iter().map(SceneNode::name).collect();
    assert_eq!(names, ["Wall__3_", "sofa_group"]);
    assert_eq!(
        room.children()[1].children()[0].bounds(),
        Some(Aabb::new(Vec3::new(-1.0, -1.0, 3.0), Vec3::new(1.0, 1.0, 4.0)))
    );
}
