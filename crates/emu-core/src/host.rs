//! Host-side collaborators.
//!
//! Everything here is supplied by the application embedding the emulator:
//! its timer, its texture API, its input system and its overlay renderer.
//! Calls are synchronous and must not block; the host runs one tick
//! callback at a time.

use crate::Millis;

/// A tick binding returned by [`TickSource::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u32);

/// A runtime texture dictionary created on the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DictionaryId(pub u32);

/// A runtime texture inside a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// An overlay resource requested from the overlay renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

/// An input-blocking channel of the host's input system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputChannel(pub u8);

/// Periodic tick delivery and the wall clock it is measured against.
pub trait TickSource {
    /// Register for tick delivery. The host delivers every subsequent tick
    /// tagged with the returned handle until it is unbound.
    fn bind(&mut self) -> TickHandle;

    /// Stop delivering ticks for `handle`. Takes effect immediately.
    fn unbind(&mut self, handle: TickHandle);

    /// Current wall-clock reading.
    fn now(&self) -> Millis;
}

/// Runtime textures the host composites on screen.
pub trait PresentationSurface {
    /// Create a texture dictionary. `None` if the host refused.
    fn create_dictionary(&mut self, name: &str) -> Option<DictionaryId>;

    /// Create a `width` × `height` texture in `dictionary`. `None` if the host refused.
    fn create_texture(
        &mut self,
        dictionary: DictionaryId,
        name: &str,
        width: u32,
        height: u32,
    ) -> Option<TextureId>;

    /// Replace the texture contents with interleaved RGBA bytes.
    /// Returns false if the upload was rejected.
    fn upload_pixels(&mut self, texture: TextureId, rgba: &[u8]) -> bool;

    /// Make the last upload visible.
    fn commit(&mut self, texture: TextureId);
}

/// The host's digital inputs.
pub trait InputSource {
    /// Block `channel` for this frame so its actions stop reaching the host.
    fn disable_channel(&mut self, channel: InputChannel);

    /// Whether input `id` on `channel` is currently held, blocked or not.
    fn is_held(&self, channel: InputChannel, id: u16) -> bool;
}

/// Renders an on-screen button legend.
///
/// Resources load asynchronously: `request` returns at once and
/// `is_ready` is polled on later ticks.
pub trait OverlayRenderer {
    /// Start loading the overlay movie `movie`.
    fn request(&mut self, movie: &str) -> OverlayId;

    /// Whether `overlay` has finished loading and is still valid.
    fn is_ready(&self, overlay: OverlayId) -> bool;

    /// Remove every slot.
    fn clear(&mut self, overlay: OverlayId);

    /// Fill slot `index` with a button glyph `name` and a text `label`.
    fn set_slot(&mut self, overlay: OverlayId, index: usize, name: &str, label: &str);

    /// Lay out the slots set since the last `clear`.
    fn finalize(&mut self, overlay: OverlayId);

    /// Draw the overlay over the full screen with an RGBA tint.
    fn present_fullscreen(&mut self, overlay: OverlayId, tint: [u8; 4]);

    /// Give the resource back to the host.
    fn release(&mut self, overlay: OverlayId);
}

/// Named metadata fields of the embedding resource.
pub trait MetadataSource {
    /// Value of `key`, or `None` if the field is absent.
    fn metadata(&self, key: &str) -> Option<String>;
}

/// The UI layer that answers initialization requests.
///
/// The answer (carrying the audio sample rate) arrives asynchronously and
/// is handed back to the emulator by the host.
pub trait InitChannel {
    fn request_init(&mut self);
}
