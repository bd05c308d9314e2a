#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Outcome presentation schedule.
//!
//! Judged attempts are turned into a short timeline of media requests: the
//! outcome animation is revealed after a delay and hidden again after a hold
//! that depends on the outcome. The timeline is advanced cooperatively by the
//! caller, so every step fires from [`OutcomePresenter::advance`] rather than
//! from a timer owned by this crate.

use std::time::Duration;

use gift_hunt_core::{AssetRef, DisplayWindow, Judgement, Outcome};
use gift_hunt_world::GameState;

/// Delays applied when presenting outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentationTiming {
    /// Delay between judging and showing the outcome media.
    pub reveal_delay: Duration,
    /// Time the success media stays visible.
    pub won_hold: Duration,
    /// Time the failure media stays visible when attempts remain.
    pub retry_hold: Duration,
    /// Time the failure media stays visible after the last attempt.
    pub final_hold: Duration,
}

impl Default for PresentationTiming {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(1_000),
            won_hold: Duration::from_millis(5_000),
            retry_hold: Duration::from_millis(4_000),
            final_hold: Duration::from_millis(5_000),
        }
    }
}

impl PresentationTiming {
    fn hold_for(&self, outcome: Outcome) -> Option<Duration> {
        match outcome {
            Outcome::Pending => None,
            Outcome::Won => Some(self.won_hold),
            Outcome::LostRetry => Some(self.retry_hold),
            Outcome::LostFinal => Some(self.final_hold),
        }
    }
}

/// Animations shown for each kind of outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeMedia {
    /// Media shown when the gift lands on the correct place.
    pub success: AssetRef,
    /// Media shown when the gift lands anywhere else.
    pub failure: AssetRef,
}

impl Default for OutcomeMedia {
    fn default() -> Self {
        Self {
            success: AssetRef::new("images/gift-giving-success.gif"),
            failure: AssetRef::new("images/gift-giving-fail.gif"),
        }
    }
}

/// Request forwarded to the presentation layer when a step comes due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaRequest {
    /// Hide the scene and show the outcome media.
    Show {
        /// Media to display.
        asset: AssetRef,
        /// Relative display duration.
        window: DisplayWindow,
    },
    /// Remove the outcome media and show the scene again.
    Hide,
}

#[derive(Clone, Debug)]
struct Step {
    due: Duration,
    sequence: u64,
    request: MediaRequest,
}

/// Timeline of pending outcome media steps.
#[derive(Clone, Debug)]
pub struct OutcomePresenter {
    timing: PresentationTiming,
    media: OutcomeMedia,
    clock: Duration,
    next_sequence: u64,
    steps: Vec<Step>,
    shown: u32,
}

impl Default for OutcomePresenter {
    fn default() -> Self {
        Self::new(PresentationTiming::default(), OutcomeMedia::default())
    }
}

impl OutcomePresenter {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new(timing: PresentationTiming, media: OutcomeMedia) -> Self {
        Self {
            timing,
            media,
            clock: Duration::ZERO,
            next_sequence: 0,
            steps: Vec::new(),
            shown: 0,
        }
    }

    /// Schedules the media for a judged attempt.
    ///
    /// Steps from earlier judgements stay on the timeline.
    pub fn present(&mut self, judgement: &Judgement, state: &GameState) {
        let Some(hold) = self.timing.hold_for(judgement.outcome) else {
            return;
        };
        let asset = match judgement.outcome {
            Outcome::Won => self.media.success.clone(),
            _ => self.media.failure.clone(),
        };

        log::info!(
            "attempt {} on {} judged {:?}; {} attempt(s) remaining",
            judgement.attempt,
            judgement.place.as_str(),
            judgement.outcome,
            state.remaining_attempts()
        );

        let reveal_at = self.clock + self.timing.reveal_delay;
        self.schedule(
            reveal_at,
            MediaRequest::Show {
                asset,
                window: judgement.window,
            },
        );
        self.schedule(reveal_at + hold, MediaRequest::Hide);
    }

    /// Advances the timeline, appending every step that came due in order.
    ///
    /// While schedules overlap, only the hide of the last visible media is
    /// forwarded.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<MediaRequest>) {
        self.clock = self.clock.saturating_add(dt);
        if self.steps.is_empty() {
            return;
        }

        self.steps.sort_by_key(|step| (step.due, step.sequence));
        let due = self
            .steps
            .iter()
            .take_while(|step| step.due <= self.clock)
            .count();

        for step in self.steps.drain(..due) {
            log::trace!("outcome step due at {:?}: {:?}", step.due, step.request);
            match step.request {
                MediaRequest::Show { .. } => self.shown = self.shown.saturating_add(1),
                MediaRequest::Hide => {
                    self.shown = self.shown.saturating_sub(1);
                    if self.shown > 0 {
                        continue;
                    }
                }
            }
            out.push(step.request);
        }
    }

    /// Reports whether outcome media currently covers the scene.
    #[must_use]
    pub const fn is_media_visible(&self) -> bool {
        self.shown > 0
    }

    /// Reports whether no steps remain on the timeline.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time elapsed on the timeline.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.clock
    }

    fn schedule(&mut self, due: Duration, request: MediaRequest) {
        self.steps.push(Step {
            due,
            sequence: self.next_sequence,
            request,
        });
        self.next_sequence = self.next_sequence.wrapping_add(1);
    }
}
