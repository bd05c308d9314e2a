#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Modal confirmation flow that gates gift placements.
//!
//! The flow is a small state machine: classified hits open either the letter
//! (informational) or a placement prompt (confirm), and control activations
//! resolve it back to idle. The flow never touches presentation elements
//! directly; it appends [`OverlayIntent`] values that a presentation adapter
//! carries out. At most one overlay exists at a time.

use gift_hunt_core::{AssetRef, ClassifiedHit, PlaceTag, WorldPoint};

const BUTTON_WIDTH_RATIO: f32 = 0.2;
const ACCEPT_CENTER_RATIO: f32 = 0.25;
const DECLINE_CENTER_RATIO: f32 = 0.75;
const BUTTON_LIFT_RATIO: f32 = 1.1;

/// Screen-space rectangle measured in pixels from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Distance from the left edge of the viewport.
    pub left: f32,
    /// Distance from the top edge of the viewport.
    pub top: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Distance from the top edge of the viewport to the bottom of the rectangle.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Reports whether the point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.bottom()
    }
}

/// Kind of modal surface requested from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalMode {
    /// Image that any click dismisses.
    Informational,
    /// Image with accept and decline controls.
    Confirm,
}

/// Fits a modal image of intrinsic `size` into the viewport, centred.
///
/// Confirm prompts are capped at 90% of the viewport height in width and 70%
/// of the viewport width in height; informational images at 70% of the
/// viewport width and 90% of its height. Images are never enlarged.
#[must_use]
pub fn fit_image(viewport: (f32, f32), size: (f32, f32), mode: ModalMode) -> Rect {
    let (viewport_width, viewport_height) = viewport;
    let (image_width, image_height) = size;
    let (max_width, max_height) = match mode {
        ModalMode::Confirm => (viewport_height * 0.9, viewport_width * 0.7),
        ModalMode::Informational => (viewport_width * 0.7, viewport_height * 0.9),
    };

    let scale = if image_width > 0.0 && image_height > 0.0 {
        (max_width / image_width).min(max_height / image_height).min(1.0)
    } else {
        0.0
    };
    let width = image_width * scale;
    let height = image_height * scale;

    Rect::new(
        (viewport_width - width) / 2.0,
        (viewport_height - height) / 2.0,
        width,
        height,
    )
}

/// Placement of the accept and decline controls over the prompt image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlLayout {
    /// Bounds of the accept control.
    pub accept: Rect,
    /// Bounds of the decline control.
    pub decline: Rect,
}

impl ControlLayout {
    /// Derives control bounds from the prompt image's rendered bounding box.
    #[must_use]
    pub fn around(image: Rect) -> Self {
        let size = image.width * BUTTON_WIDTH_RATIO;
        let top = image.bottom() - size * BUTTON_LIFT_RATIO;
        let at = |ratio: f32| {
            Rect::new(image.left + image.width * ratio - size / 2.0, top, size, size)
        };
        Self {
            accept: at(ACCEPT_CENTER_RATIO),
            decline: at(DECLINE_CENTER_RATIO),
        }
    }
}

/// Handle of a resize subscription held while a prompt is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

impl ListenerId {
    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Presentation work requested by the flow.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayIntent {
    /// Show a modal image in the provided mode.
    ShowModal {
        /// Image to display.
        image: AssetRef,
        /// Whether controls accompany the image.
        mode: ModalMode,
    },
    /// Move the prompt controls to new bounds.
    LayoutControls {
        /// Updated control bounds.
        layout: ControlLayout,
    },
    /// Remove the modal image and any controls.
    DismissModal,
    /// Start forwarding viewport resizes for the open prompt.
    SubscribeResize {
        /// Handle identifying the subscription.
        listener: ListenerId,
    },
    /// Stop forwarding viewport resizes.
    ReleaseResize {
        /// Handle returned when the subscription was made.
        listener: ListenerId,
    },
}

/// Control surfaces the player can activate while an overlay is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// The accept button of a prompt.
    Accept,
    /// The decline button of a prompt.
    Decline,
    /// The modal image itself.
    ModalImage,
    /// Anywhere outside the modal surface.
    Background,
}

/// Current state of the flow.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowState {
    /// No overlay is open.
    Idle,
    /// The letter is open.
    Informational,
    /// A placement prompt is open.
    Shown {
        /// Place the prompt asks about.
        place: PlaceTag,
        /// World point captured by the click that opened the prompt.
        point: WorldPoint,
        /// Resize subscription held while the prompt is open.
        listener: ListenerId,
        /// Latest control bounds, once the image has been laid out.
        layout: Option<ControlLayout>,
    },
}

/// Result of feeding an input into the flow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// An overlay was opened.
    Opened,
    /// The player confirmed the placement.
    Accepted {
        /// Place carried forward to judging.
        place: PlaceTag,
        /// World point captured by the opening click.
        point: WorldPoint,
    },
    /// A placement prompt closed without confirming.
    Declined,
    /// The letter was closed.
    Dismissed,
    /// The input had no effect.
    Ignored,
}

/// Modal confirmation state machine.
#[derive(Clone, Debug)]
pub struct ConfirmationFlow {
    prompt: AssetRef,
    state: FlowState,
    next_listener: u32,
}

impl ConfirmationFlow {
    /// Creates an idle flow that uses `prompt` as the placement question image.
    #[must_use]
    pub fn new(prompt: AssetRef) -> Self {
        Self {
            prompt,
            state: FlowState::Idle,
            next_listener: 0,
        }
    }

    /// Current state of the flow.
    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Reports whether no overlay is open.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, FlowState::Idle)
    }

    /// Offers a classified hit to the flow.
    ///
    /// When an overlay is already open the offer closes it instead of opening
    /// a second one.
    pub fn offer(
        &mut self,
        hit: ClassifiedHit,
        point: WorldPoint,
        letter: &AssetRef,
        out: &mut Vec<OverlayIntent>,
    ) -> Resolution {
        if !hit.interactable {
            return Resolution::Ignored;
        }

        if !self.is_idle() {
            log::debug!("overlay already open; toggling it closed");
            return self.close(out);
        }

        if hit.narrative {
            self.state = FlowState::Informational;
            out.push(OverlayIntent::ShowModal {
                image: letter.clone(),
                mode: ModalMode::Informational,
            });
            return Resolution::Opened;
        }

        let listener = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.state = FlowState::Shown {
            place: hit.place,
            point,
            listener,
            layout: None,
        };
        out.push(OverlayIntent::ShowModal {
            image: self.prompt.clone(),
            mode: ModalMode::Confirm,
        });
        out.push(OverlayIntent::SubscribeResize { listener });
        Resolution::Opened
    }

    /// Handles activation of one of the overlay's surfaces.
    pub fn activate(&mut self, control: Control, out: &mut Vec<OverlayIntent>) -> Resolution {
        let accepted = match (&self.state, control) {
            (FlowState::Idle, _) => return Resolution::Ignored,
            (FlowState::Shown { place, point, .. }, Control::Accept) => Some(Resolution::Accepted {
                place: *place,
                point: *point,
            }),
            _ => None,
        };
        let closed = self.close(out);
        accepted.unwrap_or(closed)
    }

    /// Recomputes control bounds from the prompt image's rendered box.
    ///
    /// Ignored unless a placement prompt is open.
    pub fn layout(&mut self, image: Rect, out: &mut Vec<OverlayIntent>) {
        if let FlowState::Shown { layout, .. } = &mut self.state {
            let updated = ControlLayout::around(image);
            *layout = Some(updated);
            out.push(OverlayIntent::LayoutControls { layout: updated });
        }
    }

    fn close(&mut self, out: &mut Vec<OverlayIntent>) -> Resolution {
        match std::mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::Idle => Resolution::Ignored,
            FlowState::Informational => {
                out.push(OverlayIntent::DismissModal);
                Resolution::Dismissed
            }
            FlowState::Shown { listener, .. } => {
                out.push(OverlayIntent::DismissModal);
                out.push(OverlayIntent::ReleaseResize { listener });
                Resolution::Declined
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_sit_on_the_lower_edge_of_the_image() {
        let layout = ControlLayout::around(Rect::new(100.0, 50.0, 500.0, 400.0));

        assert_eq!(layout.accept.width, 100.0);
        assert_eq!(layout.accept.left, 175.0);
        assert_eq!(layout.decline.left, 425.0);
        assert_eq!(layout.accept.top, 340.0);
        assert_eq!(layout.decline.top, layout.accept.top);
    }

    #[test]
    fn confirm_images_are_capped_by_the_swapped_viewport_limits() {
        let rect = fit_image((1000.0, 800.0), (1000.0, 1000.0), ModalMode::Confirm);
        assert_eq!(rect.width, 700.0);
        assert_eq!(rect.height, 700.0);
        assert_eq!(rect.left, 150.0);
        assert_eq!(rect.top, 50.0);
    }

    #[test]
    fn informational_images_are_never_enlarged() {
        let rect = fit_image((1000.0, 800.0), (200.0, 100.0), ModalMode::Informational);
        assert_eq!(rect, Rect::new(400.0, 350.0, 200.0, 100.0));
    }

    #[test]
    fn rect_contains_its_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(10.0, 30.0));
        assert!(!rect.contains(31.0, 15.0));
    }
}
