use gift_hunt_core::{AssetRef, DisplayWindow, GiftId, GiftPlacement};
use gift_hunt_presentation::{Presenter, RecordingPresenter};
use gift_hunt_system_confirmation::{ControlLayout, ListenerId, ModalMode, Rect};

/// Presenter that logs every intent it receives.
///
/// Modal layout is tracked by an inner [`RecordingPresenter`] so control
/// bounds follow the terminal's notion of the viewport.
#[derive(Debug)]
pub(crate) struct LoggingPresenter {
    surface: RecordingPresenter,
}

impl LoggingPresenter {
    #[must_use]
    pub(crate) fn new(viewport: (f32, f32), modal_size: (f32, f32)) -> Self {
        Self {
            surface: RecordingPresenter::new(viewport, modal_size),
        }
    }

    pub(crate) fn resize(&mut self, viewport: (f32, f32)) {
        log::info!("viewport resized to {}x{}", viewport.0, viewport.1);
        self.surface.resize(viewport);
    }

    /// Gifts currently in the scene.
    #[must_use]
    pub(crate) fn gifts(&self) -> &[GiftId] {
        self.surface.gifts()
    }
}

impl Presenter for LoggingPresenter {
    fn show_modal(&mut self, image: &AssetRef, mode: ModalMode) {
        log::info!("overlay: show {:?} modal {}", mode, image.as_str());
        self.surface.show_modal(image, mode);
    }

    fn layout_controls(&mut self, layout: ControlLayout) {
        log::debug!(
            "overlay: accept at ({:.0}, {:.0}), decline at ({:.0}, {:.0}), size {:.0}",
            layout.accept.left,
            layout.accept.top,
            layout.decline.left,
            layout.decline.top,
            layout.accept.width
        );
        self.surface.layout_controls(layout);
    }

    fn dismiss_modal(&mut self) {
        log::info!("overlay: dismiss");
        self.surface.dismiss_modal();
    }

    fn subscribe_resize(&mut self, listener: ListenerId) {
        log::debug!("overlay: resize listener {} subscribed", listener.get());
        self.surface.subscribe_resize(listener);
    }

    fn release_resize(&mut self, listener: ListenerId) {
        log::debug!("overlay: resize listener {} released", listener.get());
        self.surface.release_resize(listener);
    }

    fn modal_bounds(&self) -> Option<Rect> {
        self.surface.modal_bounds()
    }

    fn show_media(&mut self, asset: &AssetRef, window: DisplayWindow) {
        log::info!("media: show {} ({:?})", asset.as_str(), window);
        self.surface.show_media(asset, window);
    }

    fn hide_media(&mut self) {
        log::info!("media: hide");
        self.surface.hide_media();
    }

    fn place_gift(&mut self, placement: GiftPlacement) {
        log::info!(
            "scene: gift {} placed on {} at ({:.0}, {:.0}, {:.0})",
            placement.id.get(),
            placement.place.as_str(),
            placement.anchor.x,
            placement.anchor.y,
            placement.anchor.z
        );
        self.surface.place_gift(placement);
    }

    fn remove_gift(&mut self, gift: GiftId) {
        log::info!("scene: gift {} removed", gift.get());
        self.surface.remove_gift(gift);
    }
}
