use gift_hunt_core::{ClassifiedHit, PlaceTag};
use gift_hunt_system_classifier::{Classifier, NamingContract, Pattern};

#[test]
fn sofa_prefixed_names_are_sofa_placements() {
    let classifier = Classifier::default();
    for name in ["sofa", "sofa_cushion", "sofa001", "sofa_leaves_trim", "sofawindow"] {
        assert_eq!(
            classifier.classify(name),
            ClassifiedHit::placement(PlaceTag::Sofa),
            "`{name}` should classify as sofa",
        );
    }
}

#[test]
fn tree_parts_resolve_to_tree() {
    let classifier = Classifier::default();
    for name in [
        "Sphere",
        "Sphere014",
        "g_Star012_25_mesh",
        "ChristmasTree_trunk",
        "pine_leaves_03",
    ] {
        assert_eq!(
            classifier.classify(name),
            ClassifiedHit::placement(PlaceTag::Tree),
            "`{name}` should classify as tree",
        );
    }
}

#[test]
fn window_and_framing_wall_resolve_to_window() {
    let classifier = Classifier::default();
    for name in ["window", "left_window_frame", "Wall__5_", "Wall__5__inner"] {
        assert_eq!(
            classifier.classify(name),
            ClassifiedHit::placement(PlaceTag::Window),
            "`{name}` should classify as window",
        );
    }
}

#[test]
fn floor_names_resolve_to_ground() {
    let classifier = Classifier::default();
    for name in ["group_0", "Ground", "Ground_tiles"] {
        assert_eq!(
            classifier.classify(name),
            ClassifiedHit::placement(PlaceTag::Ground),
            "`{name}` should classify as ground",
        );
    }
}

#[test]
fn letter_opens_narrative_overlay() {
    let hit = Classifier::default().classify("Wall__1_");
    assert_eq!(hit, ClassifiedHit::NARRATIVE);
    assert!(hit.interactable);
    assert_eq!(hit.place, PlaceTag::Unknown);
}

#[test]
fn unmatched_names_are_ignored() {
    let classifier = Classifier::default();
    for name in [
        "Wall__3_",
        "Wall__1__frame",
        "group_01",
        "Sofa",
        "ground",
        "Window",
        "Leaves",
        "lamp",
        "",
    ] {
        assert_eq!(
            classifier.classify(name),
            ClassifiedHit::IGNORED,
            "`{name}` should be ignored",
        );
    }
}

#[test]
fn classification_is_repeatable() {
    let classifier = Classifier::default();
    for name in ["sofa_arm", "Wall__3_", "Wall__1_", "Ground", "ChristmasTree"] {
        assert_eq!(classifier.classify(name), classifier.classify(name));
    }
}

#[test]
fn earlier_place_rules_take_precedence() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify("Sphere_window_reflection").place,
        PlaceTag::Tree
    );
    assert_eq!(classifier.classify("window_Ground_edge").place, PlaceTag::Window);
    assert_eq!(
        classifier.place_rules().first().map(|rule| &rule.pattern),
        Some(&Pattern::Prefix("sofa".to_owned()))
    );
}

#[test]
fn naming_contract_overrides_designated_names() {
    let naming: NamingContract = toml::from_str(
        r#"
            letter = "Letter"
            wall_marker = "Frame"
        "#,
    )
    .expect("naming contract parses");
    assert_eq!(naming.group_root, "group_0");

    let classifier = Classifier::new(&naming);
    assert_eq!(classifier.classify("Letter"), ClassifiedHit::NARRATIVE);
    assert_eq!(classifier.classify("Wall__1_"), ClassifiedHit::IGNORED);
    assert_eq!(
        classifier.classify("Frame_left"),
        ClassifiedHit::placement(PlaceTag::Window)
    );
}
