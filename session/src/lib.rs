#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Controller that runs a single Gift Hunt playthrough.
//!
//! A [`Session`] owns the world and every interaction system, and is driven
//! by adapter callbacks: pointer clicks, control activations, viewport
//! resizes, asset-load completions, and elapsed time. All work happens on the
//! caller's thread inside those callbacks; judging completes before any
//! outcome media is scheduled.

use std::time::Duration;

use gift_hunt_core::{
    AssetRef, AssetSlot, Command, Event, GiftId, GiftPlacement, TargetDefinition,
    DEFAULT_MAX_ATTEMPTS,
};
use gift_hunt_presentation::{apply_media, apply_overlay, Presenter};
use gift_hunt_system_classifier::{Classifier, NamingContract};
use gift_hunt_system_confirmation::{ConfirmationFlow, Control, FlowState, Resolution};
use gift_hunt_system_outcome::{OutcomeMedia, OutcomePresenter, PresentationTiming};
use gift_hunt_system_picker::{BoundsRayCaster, Camera, Picker, RayCaster, SceneNode, Viewport};
use gift_hunt_system_selector::{default_catalog, select, SelectionError};
use gift_hunt_world::{self as world, query, GameState, World};
use glam::Vec2;
use rand::Rng;
use thiserror::Error;

/// Everything a session needs to start a playthrough.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Retries granted after the first miss.
    pub max_attempts: u32,
    /// Letters the target is drawn from.
    pub catalog: Vec<TargetDefinition>,
    /// Object names the classifier treats specially.
    pub naming: NamingContract,
    /// Delays applied when presenting outcomes.
    pub timing: PresentationTiming,
    /// Outcome animations.
    pub media: OutcomeMedia,
    /// Image asking the player to confirm a placement.
    pub prompt: AssetRef,
    /// Camera the room is viewed through.
    pub camera: Camera,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            catalog: default_catalog(),
            naming: NamingContract::default(),
            timing: PresentationTiming::default(),
            media: OutcomeMedia::default(),
            prompt: AssetRef::new("images/question01.png"),
            camera: Camera::default(),
        }
    }
}

/// Errors that prevent a session from starting.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No target letter could be drawn.
    #[error("failed to select a target letter")]
    Selection(#[from] SelectionError),
}

/// Single playthrough of the pick-and-judge game.
#[derive(Debug)]
pub struct Session<C = BoundsRayCaster> {
    world: World,
    letter: AssetRef,
    classifier: Classifier,
    picker: Picker<C>,
    flow: ConfirmationFlow,
    outcome: OutcomePresenter,
    camera: Camera,
    viewport: Viewport,
    room: AssetSlot<SceneNode>,
    gift_model_loaded: bool,
    pending_gift: Option<GiftPlacement>,
    shown_gift: Option<GiftId>,
}

impl Session<BoundsRayCaster> {
    /// Starts a playthrough that picks against scene bounds.
    pub fn new<R: Rng>(
        config: SessionConfig,
        viewport: Viewport,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        Self::with_caster(config, viewport, BoundsRayCaster, rng)
    }
}

impl<C: RayCaster> Session<C> {
    /// Starts a playthrough that picks through the provided ray caster.
    ///
    /// The target letter is drawn here, exactly once per session.
    pub fn with_caster<R: Rng>(
        config: SessionConfig,
        viewport: Viewport,
        caster: C,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let target = select(&config.catalog, rng)?;
        let letter = target.asset().clone();

        let mut world = World::with_max_attempts(config.max_attempts);
        let mut events = Vec::new();
        world::apply(&mut world, Command::BeginPlaythrough { target }, &mut events);

        log::info!(
            "playthrough started with letter {}; {} retries after the first miss",
            letter.as_str(),
            config.max_attempts
        );

        Ok(Self {
            world,
            letter,
            classifier: Classifier::new(&config.naming),
            picker: Picker::new(caster),
            flow: ConfirmationFlow::new(config.prompt),
            outcome: OutcomePresenter::new(config.timing, config.media),
            camera: config.camera.fitted_to(viewport),
            viewport,
            room: AssetSlot::Pending,
            gift_model_loaded: false,
            pending_gift: None,
            shown_gift: None,
        })
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Bounded-attempt state of the playthrough.
    #[must_use]
    pub fn game_state(&self) -> &GameState {
        query::game_state(&self.world)
    }

    /// Confirmation flow driving the overlay.
    #[must_use]
    pub fn flow(&self) -> &ConfirmationFlow {
        &self.flow
    }

    /// Letter drawn for the playthrough.
    #[must_use]
    pub fn letter(&self) -> &AssetRef {
        &self.letter
    }

    /// Reports whether outcome media currently hides the scene.
    #[must_use]
    pub fn is_scene_hidden(&self) -> bool {
        self.outcome.is_media_visible()
    }

    /// Enables picking once the room model finished loading.
    pub fn room_loaded(&mut self, root: SceneNode) {
        log::debug!("room model loaded as `{}`", root.name());
        self.room = AssetSlot::Loaded(root);
    }

    /// Marks the gift model as loaded and shows any placement made before.
    pub fn gift_loaded<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.gift_model_loaded = true;
        if let Some(placement) = self.pending_gift.take() {
            self.show_gift(placement, presenter);
        }
    }

    /// Handles a pointer click at the provided viewport position.
    pub fn click<P: Presenter + ?Sized>(&mut self, pointer: Vec2, presenter: &mut P) -> Resolution {
        if self.outcome.is_media_visible() {
            log::debug!("click ignored while outcome media is shown");
            return Resolution::Ignored;
        }

        if !self.flow.is_idle() {
            let control = self.overlay_control_at(pointer, presenter);
            return self.activate(control, presenter);
        }

        let Some(hit) = self
            .picker
            .pick(pointer, self.viewport, &self.camera, &self.room)
        else {
            return Resolution::Ignored;
        };

        let classified = self.classifier.classify(&hit.object_id);
        if !classified.interactable {
            log::debug!("click on `{}` ignored", hit.object_id);
            return Resolution::Ignored;
        }
        if !classified.narrative && self.game_state().outcome().is_terminal() {
            log::debug!("placement prompt suppressed; the playthrough is over");
            return Resolution::Ignored;
        }

        let mut intents = Vec::new();
        let resolution = self
            .flow
            .offer(classified, hit.world_point, &self.letter, &mut intents);
        for intent in intents {
            apply_overlay(presenter, intent);
        }
        self.layout_controls(presenter);
        resolution
    }

    /// Handles activation of an overlay control.
    pub fn activate<P: Presenter + ?Sized>(
        &mut self,
        control: Control,
        presenter: &mut P,
    ) -> Resolution {
        let mut intents = Vec::new();
        let resolution = self.flow.activate(control, &mut intents);
        for intent in intents {
            apply_overlay(presenter, intent);
        }

        if let Resolution::Accepted { place, point } = resolution {
            log::debug!(
                "placement on {} confirmed at ({:.1}, {:.1}, {:.1})",
                place.as_str(),
                point.x,
                point.y,
                point.z
            );
            self.place_gift(Command::PlaceGift { place }, presenter);
        }
        resolution
    }

    /// Handles a viewport resize.
    pub fn resize<P: Presenter + ?Sized>(&mut self, viewport: Viewport, presenter: &mut P) {
        self.viewport = viewport;
        self.camera = self.camera.fitted_to(viewport);
        self.layout_controls(presenter);
    }

    /// Advances the outcome timeline by `dt`.
    pub fn advance<P: Presenter + ?Sized>(&mut self, dt: Duration, presenter: &mut P) {
        let mut requests = Vec::new();
        self.outcome.advance(dt, &mut requests);
        for request in requests {
            apply_media(presenter, request);
        }
    }

    fn place_gift<P: Presenter + ?Sized>(&mut self, command: Command, presenter: &mut P) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        for event in events {
            match event {
                Event::GiftPlaced {
                    placement,
                    superseded,
                } => {
                    if let Some(previous) = superseded {
                        log::debug!(
                            "gift {} supersedes gift {}",
                            placement.id.get(),
                            previous.get()
                        );
                    }
                    self.show_gift(placement, presenter);
                }
                Event::AttemptJudged { judgement } => {
                    let state = *query::game_state(&self.world);
                    self.outcome.present(&judgement, &state);
                }
                Event::PlacementRejected { place, reason } => {
                    log::warn!("placement on {} rejected: {reason:?}", place.as_str());
                }
                Event::PlaythroughStarted { .. } | Event::PlaythroughRejected { .. } => {}
            }
        }
    }

    fn show_gift<P: Presenter + ?Sized>(&mut self, placement: GiftPlacement, presenter: &mut P) {
        if !self.gift_model_loaded {
            log::debug!("gift model still loading; holding gift {}", placement.id.get());
            self.pending_gift = Some(placement);
            return;
        }
        if let Some(previous) = self.shown_gift.take() {
            presenter.remove_gift(previous);
        }
        presenter.place_gift(placement);
        self.shown_gift = Some(placement.id);
    }

    fn layout_controls<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        if !matches!(self.flow.state(), FlowState::Shown { .. }) {
            return;
        }
        let Some(bounds) = presenter.modal_bounds() else {
            return;
        };
        let mut intents = Vec::new();
        self.flow.layout(bounds, &mut intents);
        for intent in intents {
            apply_overlay(presenter, intent);
        }
    }

    fn overlay_control_at<P: Presenter + ?Sized>(&self, pointer: Vec2, presenter: &P) -> Control {
        if let FlowState::Shown {
            layout: Some(layout),
            ..
        } = self.flow.state()
        {
            if layout.accept.contains(pointer.x, pointer.y) {
                return Control::Accept;
            }
            if layout.decline.contains(pointer.x, pointer.y) {
                return Control::Decline;
            }
        }
        match presenter.modal_bounds() {
            Some(bounds) if bounds.contains(pointer.x, pointer.y) => Control::ModalImage,
            _ => Control::Background,
        }
    }
}
