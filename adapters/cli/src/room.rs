use gift_hunt_system_picker::{Aabb, SceneNode};
use glam::Vec3;

fn block(center: [f32; 3], size: [f32; 3]) -> Aabb {
    Aabb::from_center_size(Vec3::from_array(center), Vec3::from_array(size))
}

/// Box-bounded stand-in for the living room model.
///
/// Object names follow the room model's naming so the classifier treats them
/// the same way. Seen from the default camera at 1280x720, the objects' centres
/// land at roughly: sofa (936, 426), tree (532, 330), star (527, 229),
/// window (123, 318), letter (774, 235), plain back wall (919, 257), and the
/// floor is exposed around (270, 694).
#[must_use]
pub(crate) fn scene() -> SceneNode {
    SceneNode::group(
        "group_0",
        vec![
            SceneNode::mesh("Ground", block([0.0, -5.0, 300.0], [1_600.0, 10.0, 1_600.0])),
            SceneNode::group(
                "couch",
                vec![SceneNode::mesh(
                    "sofa_seat",
                    block([600.0, 75.0, 235.0], [240.0, 150.0, 120.0]),
                )],
            ),
            SceneNode::group(
                "tree_group",
                vec![
                    SceneNode::mesh(
                        "ChristmasTree_trunk",
                        block([-10.0, 140.0, 320.0], [140.0, 280.0, 140.0]),
                    ),
                    SceneNode::mesh(
                        "g_Star012_25",
                        block([-10.0, 300.0, 320.0], [40.0, 40.0, 40.0]),
                    ),
                ],
            ),
            SceneNode::mesh("window_pane", block([-400.0, 200.0, 730.0], [10.0, 200.0, 260.0])),
            SceneNode::mesh("Wall__5_", block([-405.0, 200.0, 250.0], [10.0, 400.0, 400.0])),
            SceneNode::mesh("Wall__1_", block([150.0, 220.0, -300.0], [120.0, 160.0, 10.0])),
            SceneNode::mesh("Wall__3_", block([450.0, 200.0, -305.0], [300.0, 400.0, 10.0])),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gift_hunt_system_classifier::Classifier;

    #[test]
    fn every_named_object_classifies_as_intended() {
        let classifier = Classifier::default();
        let mut names = Vec::new();
        scene().walk(&mut |node| names.push(node.name().to_owned()));

        let interactable: Vec<_> = names
            .iter()
            .filter(|name| classifier.classify(name).interactable)
            .cloned()
            .collect();
        assert!(!interactable.contains(&"Wall__3_".to_owned()));
        assert!(!interactable.contains(&"couch".to_owned()));
        assert!(interactable.contains(&"sofa_seat".to_owned()));
        assert!(interactable.contains(&"Wall__1_".to_owned()));
    }
}
