//! Controls overlay.
//!
//! The overlay movie loads asynchronously. It is requested on the first tick
//! that wants it, polled on every tick after that, and drawn on each tick it
//! reports ready. If a loaded overlay stops being valid it is released and
//! requested again. Nothing here blocks or fails a tick.

use emu_core::{OverlayId, OverlayRenderer};

use crate::controls::Control;

/// Overlay movie listing button prompts.
pub const OVERLAY_MOVIE: &str = "INSTRUCTIONAL_BUTTONS";

/// Fullscreen draw tint (opaque white, i.e. untinted).
pub const OVERLAY_TINT: [u8; 4] = [255, 255, 255, 255];

/// Where the overlay resource is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    NotRequested,
    /// Requested; the renderer has not reported it loaded yet.
    Pending(OverlayId),
    /// Loaded at least once.
    Ready(OverlayId),
}

impl OverlayState {
    /// Request or poll the overlay and, if it is loaded, draw one slot per
    /// control. Returns whether anything was drawn this tick.
    pub fn draw(&mut self, renderer: &mut dyn OverlayRenderer, table: &[Control]) -> bool {
        let id = match *self {
            Self::NotRequested => {
                let id = renderer.request(OVERLAY_MOVIE);
                *self = Self::Pending(id);
                id
            }
            Self::Pending(id) | Self::Ready(id) => id,
        };

        if !renderer.is_ready(id) {
            if let Self::Ready(_) = *self {
                log::debug!("overlay {id:?} invalidated, requesting again");
                renderer.release(id);
                *self = Self::Pending(renderer.request(OVERLAY_MOVIE));
            }
            return false;
        }
        if let Self::Pending(_) = *self {
            log::debug!("overlay {id:?} ready");
            *self = Self::Ready(id);
        }

        renderer.clear(id);
        for (index, control) in table.iter().enumerate() {
            renderer.set_slot(id, index, control.name, control.label);
        }
        renderer.finalize(id);
        renderer.present_fullscreen(id, OVERLAY_TINT);
        true
    }

    /// Hand the resource back, if one was requested.
    pub fn release(&mut self, renderer: &mut dyn OverlayRenderer) {
        match std::mem::take(self) {
            Self::Pending(id) | Self::Ready(id) => renderer.release(id),
            Self::NotRequested => {}
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotRequested => "not_requested",
            Self::Pending(_) => "pending",
            Self::Ready(_) => "ready",
        }
    }
}
