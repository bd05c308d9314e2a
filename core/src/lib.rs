#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gift Hunt engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate pointer input
//! into [`HitResult`] values, systems classify and confirm them, and accepted
//! placements reach the world as [`Command`] values. The world judges each
//! placement and broadcasts [`Event`] values that the outcome presenter and
//! adapters react to.

use serde::{Deserialize, Serialize};

/// Number of additional judged attempts granted after the first miss.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Semantic location in the room where a gift may be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceTag {
    /// The sofa standing against the back wall.
    Sofa,
    /// The decorated Christmas tree, including its ornaments and star.
    Tree,
    /// The window and the wall segment that frames it.
    Window,
    /// The floor of the room.
    Ground,
    /// A hit that resolves to no concrete place.
    Unknown,
}

impl PlaceTag {
    /// Every concrete place a gift may be judged against.
    pub const CONCRETE: [PlaceTag; 4] = [Self::Sofa, Self::Tree, Self::Window, Self::Ground];

    /// Lowercase name used in configuration files and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sofa => "sofa",
            Self::Tree => "tree",
            Self::Window => "window",
            Self::Ground => "ground",
            Self::Unknown => "unknown",
        }
    }

    /// Reports whether the tag names a concrete place.
    #[must_use]
    pub const fn is_concrete(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Opaque reference to a 2D image resource owned by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Creates a new asset reference from the provided path or key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the textual representation of the reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Letter drawn at game start together with the place it secretly asks for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDefinition {
    asset: AssetRef,
    correct_place: PlaceTag,
}

impl TargetDefinition {
    /// Creates a new target definition.
    #[must_use]
    pub const fn new(asset: AssetRef, correct_place: PlaceTag) -> Self {
        Self {
            asset,
            correct_place,
        }
    }

    /// Image shown to the player when the letter is opened.
    #[must_use]
    pub const fn asset(&self) -> &AssetRef {
        &self.asset
    }

    /// Hidden place the gift must be put on to win.
    #[must_use]
    pub const fn correct_place(&self) -> PlaceTag {
        self.correct_place
    }
}

/// Point in world space expressed in scene units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Position along the x axis.
    pub x: f32,
    /// Position along the y axis.
    pub y: f32,
    /// Position along the z axis.
    pub z: f32,
}

impl WorldPoint {
    /// Origin of the world coordinate system.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new world point.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Asynchronously loaded scene asset that may still be streaming in.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetSlot<T> {
    /// The asset has not finished loading.
    Pending,
    /// The asset is available in the scene.
    Loaded(T),
}

impl<T> AssetSlot<T> {
    /// Returns the loaded asset, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Pending => None,
            Self::Loaded(asset) => Some(asset),
        }
    }

    /// Reports whether the asset finished loading.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl<T> Default for AssetSlot<T> {
    fn default() -> Self {
        Self::Pending
    }
}

/// Nearest intersection between a pointer ray and the interactable scene.
#[derive(Clone, Debug, PartialEq)]
pub struct HitResult {
    /// Name of the scene object that was intersected.
    pub object_id: String,
    /// World-space point where the ray met the object.
    pub world_point: WorldPoint,
}

impl HitResult {
    /// Creates a new hit result.
    #[must_use]
    pub fn new(object_id: impl Into<String>, world_point: WorldPoint) -> Self {
        Self {
            object_id: object_id.into(),
            world_point,
        }
    }
}

/// Semantic interpretation of a hit object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassifiedHit {
    /// Place the object belongs to.
    pub place: PlaceTag,
    /// Whether the click should open an overlay at all.
    pub interactable: bool,
    /// Whether the object opens the letter instead of a placement prompt.
    pub narrative: bool,
}

impl ClassifiedHit {
    /// Classification of an object that ignores clicks.
    pub const IGNORED: Self = Self {
        place: PlaceTag::Unknown,
        interactable: false,
        narrative: false,
    };

    /// Classification of the letter object.
    pub const NARRATIVE: Self = Self {
        place: PlaceTag::Unknown,
        interactable: true,
        narrative: true,
    };

    /// Classification of an object that accepts a gift placement.
    #[must_use]
    pub const fn placement(place: PlaceTag) -> Self {
        Self {
            place,
            interactable: true,
            narrative: false,
        }
    }
}

/// Unique identifier assigned to each placed gift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GiftId(u32);

impl GiftId {
    /// Creates a new gift identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Gift put down by the player on a judged attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftPlacement {
    /// Identifier allocated to the gift by the world.
    pub id: GiftId,
    /// Place the gift was put on.
    pub place: PlaceTag,
    /// Canonical anchor point the gift model is positioned at.
    pub anchor: WorldPoint,
}

/// Progress of a playthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// No attempt has been judged yet.
    #[default]
    Pending,
    /// The gift was put on the correct place.
    Won,
    /// The attempt missed but more attempts remain.
    LostRetry,
    /// The attempt missed and no attempts remain.
    LostFinal,
}

impl Outcome {
    /// Reports whether no further attempts may be judged.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::LostFinal)
    }
}

/// Relative duration the outcome media should stay on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayWindow {
    /// Brief display before the scene becomes interactive again.
    Short,
    /// Longer display that communicates the end of the game.
    Extended,
}

/// Result of judging a single placement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Judgement {
    /// One-based number of the judged attempt.
    pub attempt: u32,
    /// Place the player put the gift on.
    pub place: PlaceTag,
    /// Outcome reached after the attempt.
    pub outcome: Outcome,
    /// How long the outcome media should remain visible.
    pub window: DisplayWindow,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts the playthrough with the target drawn at scene-ready time.
    BeginPlaythrough {
        /// Letter and hidden answer for this playthrough.
        target: TargetDefinition,
    },
    /// Puts the gift on the provided place and judges the attempt.
    PlaceGift {
        /// Place confirmed by the player.
        place: PlaceTag,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a playthrough started.
    PlaythroughStarted {
        /// Letter the player has to read to find the answer.
        asset: AssetRef,
    },
    /// Reports that a playthrough start was rejected.
    PlaythroughRejected {
        /// Specific reason the start failed.
        reason: PlaythroughError,
    },
    /// Confirms that a gift was placed into the scene.
    GiftPlaced {
        /// Newly placed gift.
        placement: GiftPlacement,
        /// Gift that the new placement replaced, if any.
        superseded: Option<GiftId>,
    },
    /// Announces the judgement of a placement attempt.
    AttemptJudged {
        /// Outcome of the attempt.
        judgement: Judgement,
    },
    /// Reports that a placement request was rejected without judging.
    PlacementRejected {
        /// Place provided in the request.
        place: PlaceTag,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
}

/// Reasons a playthrough start may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaythroughError {
    /// A target is already live for this playthrough.
    AlreadyStarted,
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementError {
    /// No playthrough has been started yet.
    NotStarted,
    /// The playthrough already reached a terminal outcome.
    Finished,
}
