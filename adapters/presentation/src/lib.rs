#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Gift Hunt adapters.
//!
//! The interaction engine never creates or removes overlay elements itself.
//! It emits overlay intents and media requests, and an adapter implementing
//! [`Presenter`] carries them out against whatever surface it controls.

use gift_hunt_core::{AssetRef, DisplayWindow, GiftId, GiftPlacement};
use gift_hunt_system_confirmation::{ControlLayout, ListenerId, ModalMode, OverlayIntent, Rect};
use gift_hunt_system_outcome::MediaRequest;

/// Presentation surface capable of showing Gift Hunt overlays and media.
pub trait Presenter {
    /// Shows a modal image, with controls when `mode` is [`ModalMode::Confirm`].
    fn show_modal(&mut self, image: &AssetRef, mode: ModalMode);

    /// Moves the prompt controls to the provided bounds.
    fn layout_controls(&mut self, layout: ControlLayout);

    /// Removes the modal image and its controls.
    fn dismiss_modal(&mut self);

    /// Starts forwarding viewport resizes for the open prompt.
    fn subscribe_resize(&mut self, listener: ListenerId);

    /// Stops forwarding viewport resizes for the listener.
    fn release_resize(&mut self, listener: ListenerId);

    /// Rendered bounding box of the modal image, once it has been laid out.
    fn modal_bounds(&self) -> Option<Rect>;

    /// Hides the scene and shows outcome media.
    fn show_media(&mut self, asset: &AssetRef, window: DisplayWindow);

    /// Removes outcome media and shows the scene again.
    fn hide_media(&mut self);

    /// Adds the gift model to the scene at the placement's anchor.
    fn place_gift(&mut self, placement: GiftPlacement);

    /// Removes a previously placed gift model from the scene.
    fn remove_gift(&mut self, gift: GiftId);
}

/// Carries out an overlay intent on the presenter.
pub fn apply_overlay<P: Presenter + ?Sized>(presenter: &mut P, intent: OverlayIntent) {
    match intent {
        OverlayIntent::ShowModal { image, mode } => presenter.show_modal(&image, mode),
        OverlayIntent::LayoutControls { layout } => presenter.layout_controls(layout),
        OverlayIntent::DismissModal => presenter.dismiss_modal(),
        OverlayIntent::SubscribeResize { listener } => presenter.subscribe_resize(listener),
        OverlayIntent::ReleaseResize { listener } => presenter.release_resize(listener),
    }
}

/// Carries out a media request on the presenter.
pub fn apply_media<P: Presenter + ?Sized>(presenter: &mut P, request: MediaRequest) {
    match request {
        MediaRequest::Show { asset, window } => presenter.show_media(&asset, window),
        MediaRequest::Hide => presenter.hide_media(),
    }
}

/// Presenter call captured by [`RecordingPresenter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PresentationCall {
    /// [`Presenter::show_modal`] was invoked.
    ShowModal {
        /// Image requested.
        image: AssetRef,
        /// Modal mode requested.
        mode: ModalMode,
    },
    /// [`Presenter::layout_controls`] was invoked.
    LayoutControls {
        /// Bounds requested.
        layout: ControlLayout,
    },
    /// [`Presenter::dismiss_modal`] was invoked.
    DismissModal,
    /// [`Presenter::subscribe_resize`] was invoked.
    SubscribeResize {
        /// Listener subscribed.
        listener: ListenerId,
    },
    /// [`Presenter::release_resize`] was invoked.
    ReleaseResize {
        /// Listener released.
        listener: ListenerId,
    },
    /// [`Presenter::show_media`] was invoked.
    ShowMedia {
        /// Media requested.
        asset: AssetRef,
        /// Display window requested.
        window: DisplayWindow,
    },
    /// [`Presenter::hide_media`] was invoked.
    HideMedia,
    /// [`Presenter::place_gift`] was invoked.
    PlaceGift {
        /// Placement requested.
        placement: GiftPlacement,
    },
    /// [`Presenter::remove_gift`] was invoked.
    RemoveGift {
        /// Gift removed.
        gift: GiftId,
    },
}

/// Presenter that records every call and tracks the resulting surface state.
///
/// The modal image is laid out with a fixed intrinsic size inside the
/// configured viewport, mirroring how a browser would fit it.
#[derive(Clone, Debug)]
pub struct RecordingPresenter {
    calls: Vec<PresentationCall>,
    viewport: (f32, f32),
    image_size: (f32, f32),
    modal: Option<(ModalMode, Rect)>,
    listeners: Vec<ListenerId>,
    gifts: Vec<GiftId>,
    media_visible: bool,
}

impl RecordingPresenter {
    /// Creates a presenter for a viewport of the provided size.
    #[must_use]
    pub fn new(viewport: (f32, f32), image_size: (f32, f32)) -> Self {
        Self {
            calls: Vec::new(),
            viewport,
            image_size,
            modal: None,
            listeners: Vec::new(),
            gifts: Vec::new(),
            media_visible: false,
        }
    }

    /// Updates the viewport, refitting any open modal image.
    pub fn resize(&mut self, viewport: (f32, f32)) {
        self.viewport = viewport;
        if let Some((mode, _)) = self.modal {
            self.modal = Some((
                mode,
                gift_hunt_system_confirmation::fit_image(viewport, self.image_size, mode),
            ));
        }
    }

    /// Calls captured so far.
    #[must_use]
    pub fn calls(&self) -> &[PresentationCall] {
        &self.calls
    }

    /// Removes and returns the calls captured so far.
    pub fn take_calls(&mut self) -> Vec<PresentationCall> {
        std::mem::take(&mut self.calls)
    }

    /// Resize listeners currently subscribed.
    #[must_use]
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Gifts currently present in the scene.
    #[must_use]
    pub fn gifts(&self) -> &[GiftId] {
        &self.gifts
    }

    /// Reports whether a modal image is open.
    #[must_use]
    pub const fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Reports whether outcome media covers the scene.
    #[must_use]
    pub const fn is_media_visible(&self) -> bool {
        self.media_visible
    }
}

impl Presenter for RecordingPresenter {
    fn show_modal(&mut self, image: &AssetRef, mode: ModalMode) {
        self.modal = Some((
            mode,
            gift_hunt_system_confirmation::fit_image(self.viewport, self.image_size, mode),
        ));
        self.calls.push(PresentationCall::ShowModal {
            image: image.clone(),
            mode,
        });
    }

    fn layout_controls(&mut self, layout: ControlLayout) {
        self.calls.push(PresentationCall::LayoutControls { layout });
    }

    fn dismiss_modal(&mut self) {
        self.modal = None;
        self.calls.push(PresentationCall::DismissModal);
    }

    fn subscribe_resize(&mut self, listener: ListenerId) {
        self.listeners.push(listener);
        self.calls.push(PresentationCall::SubscribeResize { listener });
    }

    fn release_resize(&mut self, listener: ListenerId) {
        self.listeners.retain(|held| *held != listener);
        self.calls.push(PresentationCall::ReleaseResize { listener });
    }

    fn modal_bounds(&self) -> Option<Rect> {
        self.modal.map(|(_, bounds)| bounds)
    }

    fn show_media(&mut self, asset: &AssetRef, window: DisplayWindow) {
        self.media_visible = true;
        self.calls.push(PresentationCall::ShowMedia {
            asset: asset.clone(),
            window,
        });
    }

    fn hide_media(&mut self) {
        self.media_visible = false;
        self.calls.push(PresentationCall::HideMedia);
    }

    fn place_gift(&mut self, placement: GiftPlacement) {
        self.gifts.push(placement.id);
        self.calls.push(PresentationCall::PlaceGift { placement });
    }

    fn remove_gift(&mut self, gift: GiftId) {
        self.gifts.retain(|held| *held != gift);
        self.calls.push(PresentationCall::RemoveGift { gift });
    }
}
