#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Gift Hunt.
//!
//! The world owns the single live [`TargetDefinition`] and the bounded-attempt
//! [`GameState`]. Every mutation flows through [`apply`], which delegates the
//! judging step to the pure [`judge`] function so the state machine can be
//! exercised without a world instance.

use gift_hunt_core::{
    AssetRef, Command, DisplayWindow, Event, GiftId, GiftPlacement, Judgement, Outcome,
    PlaceTag, PlacementError, PlaythroughError, TargetDefinition, WorldPoint,
    DEFAULT_MAX_ATTEMPTS,
};

const SOFA_ANCHOR: WorldPoint = WorldPoint::new(600.0, 150.0, 235.0);
const TREE_ANCHOR: WorldPoint = WorldPoint::new(-10.0, 80.0, 320.0);
const WINDOW_ANCHOR: WorldPoint = WorldPoint::new(-270.0, 80.0, 730.0);
const GROUND_ANCHOR: WorldPoint = WorldPoint::new(97.0, 80.0, 750.0);

/// Fixed point the gift model is moved to when placed on the provided place.
#[must_use]
pub const fn canonical_anchor(place: PlaceTag) -> WorldPoint {
    match place {
        PlaceTag::Sofa => SOFA_ANCHOR,
        PlaceTag::Tree => TREE_ANCHOR,
        PlaceTag::Window => WINDOW_ANCHOR,
        PlaceTag::Ground => GROUND_ANCHOR,
        PlaceTag::Unknown => WorldPoint::ORIGIN,
    }
}

/// Bounded-attempt progress of a single playthrough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameState {
    attempts: u32,
    max_attempts: u32,
    current_placement: Option<GiftPlacement>,
    outcome: Outcome,
}

impl GameState {
    /// Creates a fresh state that allows `max_attempts` retries after the first miss.
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
            current_placement: None,
            outcome: Outcome::Pending,
        }
    }

    /// Number of attempts judged so far.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Threshold that `attempts` must exceed before a miss becomes final.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Most recent gift placement, if any.
    #[must_use]
    pub const fn current_placement(&self) -> Option<GiftPlacement> {
        self.current_placement
    }

    /// Outcome reached by the latest judged attempt.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Attempts the player may still make before the game ends.
    #[must_use]
    pub const fn remaining_attempts(&self) -> u32 {
        if self.outcome.is_terminal() {
            return 0;
        }
        self.max_attempts.saturating_add(1).saturating_sub(self.attempts)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Judges a placement attempt against the hidden correct place.
///
/// The attempt counter always advances and the gift is always moved to the
/// attempted place's anchor, replacing any previous gift. `Unknown` never
/// matches, so it counts as a miss.
#[must_use]
pub fn judge(
    attempt_place: PlaceTag,
    correct_place: PlaceTag,
    state: &GameState,
) -> (GameState, Judgement) {
    let attempts = state.attempts.saturating_add(1);
    let placement = GiftPlacement {
        id: GiftId::new(attempts),
        place: attempt_place,
        anchor: canonical_anchor(attempt_place),
    };

    let outcome = if attempt_place.is_concrete() && attempt_place == correct_place {
        Outcome::Won
    } else if attempts > state.max_attempts {
        Outcome::LostFinal
    } else {
        Outcome::LostRetry
    };

    let window = match outcome {
        Outcome::LostFinal => DisplayWindow::Extended,
        Outcome::Won | Outcome::LostRetry | Outcome::Pending => DisplayWindow::Short,
    };

    let next = GameState {
        attempts,
        max_attempts: state.max_attempts,
        current_placement: Some(placement),
        outcome,
    };

    (
        next,
        Judgement {
            attempt: attempts,
            place: attempt_place,
            outcome,
            window,
        },
    )
}

/// Represents the authoritative Gift Hunt world state.
#[derive(Debug)]
pub struct World {
    target: Option<TargetDefinition>,
    state: GameState,
}

impl World {
    /// Creates a new world with the default attempt threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates a new world that allows `max_attempts` retries after the first miss.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            target: None,
            state: GameState::new(max_attempts),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginPlaythrough { target } => {
            if world.target.is_some() {
                out_events.push(Event::PlaythroughRejected {
                    reason: PlaythroughError::AlreadyStarted,
                });
                return;
            }
            let asset = target.asset().clone();
            world.target = Some(target);
            out_events.push(Event::PlaythroughStarted { asset });
        }
        Command::PlaceGift { place } => {
            let Some(target) = world.target.as_ref() else {
                out_events.push(Event::PlacementRejected {
                    place,
                    reason: PlacementError::NotStarted,
                });
                return;
            };

            if world.state.outcome.is_terminal() {
                out_events.push(Event::PlacementRejected {
                    place,
                    reason: PlacementError::Finished,
                });
                return;
            }

            let superseded = world.state.current_placement.map(|placement| placement.id);
            let (next, judgement) = judge(place, target.correct_place(), &world.state);
            world.state = next;

            if let Some(placement) = next.current_placement {
                out_events.push(Event::GiftPlaced {
                    placement,
                    superseded,
                });
            }
            out_events.push(Event::AttemptJudged { judgement });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{AssetRef, GameState, PlaceTag, World};

    /// Provides read-only access to the bounded-attempt state.
    #[must_use]
    pub fn game_state(world: &World) -> &GameState {
        &world.state
    }

    /// Letter image selected for the playthrough, if one started.
    #[must_use]
    pub fn letter(world: &World) -> Option<&AssetRef> {
        world.target.as_ref().map(|target| target.asset())
    }

    /// Reports whether a playthrough is live.
    #[must_use]
    pub fn is_started(world: &World) -> bool {
        world.target.is_some()
    }

    /// Hidden answer, available only once at least one attempt was judged.
    #[must_use]
    pub fn revealed_place(world: &World) -> Option<PlaceTag> {
        if world.state.attempts() == 0 {
            return None;
        }
        world.target.as_ref().map(|target| target.correct_place())
    }
}
