#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that maps scene object names onto semantic places.
//!
//! The room model exposes dozens of sub-meshes whose names vary between
//! exports. Classification is driven by two ordered rule tables: a gate table
//! deciding whether a click opens a placement prompt at all, and a place table
//! resolving the prompt's [`PlaceTag`]. The first matching rule wins in both.

use gift_hunt_core::{ClassifiedHit, PlaceTag};
use serde::Deserialize;

/// Object names the classifier treats specially.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamingContract {
    /// Exact name of the letter pinned to the wall.
    pub letter: String,
    /// Exact name of the room's root group, which counts as the floor.
    pub group_root: String,
    /// Marker contained in the wall segment around the window.
    pub wall_marker: String,
    /// Marker contained in the star on top of the tree.
    pub star_marker: String,
}

impl Default for NamingContract {
    fn default() -> Self {
        Self {
            letter: "Wall__1_".to_owned(),
            group_root: "group_0".to_owned(),
            wall_marker: "Wall__5_".to_owned(),
            star_marker: "g_Star012_25".to_owned(),
        }
    }
}

/// Case-sensitive test applied to an object name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Name equals the text.
    Exact(String),
    /// Name starts with the text.
    Prefix(String),
    /// Name contains the text anywhere.
    Contains(String),
}

impl Pattern {
    /// Reports whether the object name satisfies the pattern.
    #[must_use]
    pub fn matches(&self, object_id: &str) -> bool {
        match self {
            Self::Exact(text) => object_id == text,
            Self::Prefix(text) => object_id.starts_with(text.as_str()),
            Self::Contains(text) => object_id.contains(text.as_str()),
        }
    }
}

/// Entry of the place table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceRule {
    /// Pattern the object name must satisfy.
    pub pattern: Pattern,
    /// Place assigned when the pattern matches.
    pub place: PlaceTag,
}

/// Classifier holding the ordered rule tables derived from a naming contract.
#[derive(Clone, Debug)]
pub struct Classifier {
    narrative: Pattern,
    gate: Vec<Pattern>,
    places: Vec<PlaceRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&NamingContract::default())
    }
}

impl Classifier {
    /// Builds the rule tables for the provided naming contract.
    #[must_use]
    pub fn new(naming: &NamingContract) -> Self {
        let gate = vec![
            Pattern::Exact(naming.group_root.clone()),
            Pattern::Prefix("sofa".to_owned()),
            Pattern::Contains("leaves".to_owned()),
            Pattern::Contains(naming.wall_marker.clone()),
            Pattern::Contains("window".to_owned()),
            Pattern::Prefix("Sphere".to_owned()),
            Pattern::Contains(naming.star_marker.clone()),
            Pattern::Contains("ChristmasTree".to_owned()),
            Pattern::Contains("Ground".to_owned()),
        ];

        let places = vec![
            rule(Pattern::Prefix("sofa".to_owned()), PlaceTag::Sofa),
            rule(Pattern::Prefix("Sphere".to_owned()), PlaceTag::Tree),
            rule(Pattern::Contains(naming.star_marker.clone()), PlaceTag::Tree),
            rule(Pattern::Contains("ChristmasTree".to_owned()), PlaceTag::Tree),
            rule(Pattern::Contains("leaves".to_owned()), PlaceTag::Tree),
            rule(Pattern::Contains("window".to_owned()), PlaceTag::Window),
            rule(Pattern::Contains(naming.wall_marker.clone()), PlaceTag::Window),
            rule(Pattern::Exact(naming.group_root.clone()), PlaceTag::Ground),
            rule(Pattern::Contains("Ground".to_owned()), PlaceTag::Ground),
        ];

        Self {
            narrative: Pattern::Exact(naming.letter.clone()),
            gate,
            places,
        }
    }

    /// Classifies the object with the provided name.
    #[must_use]
    pub fn classify(&self, object_id: &str) -> ClassifiedHit {
        if self.narrative.matches(object_id) {
            return ClassifiedHit::NARRATIVE;
        }

        if !self.gate.iter().any(|pattern| pattern.matches(object_id)) {
            return ClassifiedHit::IGNORED;
        }

        ClassifiedHit::placement(self.place_of(object_id))
    }

    /// Ordered place table consulted after the gate admits a name.
    #[must_use]
    pub fn place_rules(&self) -> &[PlaceRule] {
        &self.places
    }

    fn place_of(&self, object_id: &str) -> PlaceTag {
        self.places
            .iter()
            .find(|rule| rule.pattern.matches(object_id))
            .map_or(PlaceTag::Unknown, |rule| rule.place)
    }
}

fn rule(pattern: Pattern, place: PlaceTag) -> PlaceRule {
    PlaceRule { pattern, place }
}
