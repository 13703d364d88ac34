//! Emulation session: start/stop lifecycle and the per-tick driver.
//!
//! A session is Stopped or Running. Running means exactly one live tick
//! binding, one core with a program loaded, and a timestep accumulator.
//! Every path out of Running (`stop`, `run` while running, drop) unbinds
//! the tick before anything else.

use emu_core::{
    CoreFactory, EmulatorCore, InputSource, Observable, OverlayRenderer, PresentationSurface,
    TextureId, TickHandle, TickSource, Value,
};

use crate::config::SessionConfig;
use crate::controls::CONTROLS;
use crate::error::SessionError;
use crate::framebuffer::{self, FrameBuffer, RgbaFrame};
use crate::input::{self, ButtonMask};
use crate::overlay::OverlayState;
use crate::timestep::Timestep;

/// The host services a session talks to.
pub struct Platform {
    pub surface: Box<dyn PresentationSurface>,
    pub ticks: Box<dyn TickSource>,
    pub input: Box<dyn InputSource>,
    pub overlay: Box<dyn OverlayRenderer>,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Whole frames stepped (zero when the host ticks faster than the target rate).
    pub frames_stepped: u32,
    /// Milliseconds left in the accumulator.
    pub accumulated_ms: i64,
    /// Whether the controls overlay was drawn.
    pub overlay_drawn: bool,
}

enum Lifecycle {
    Stopped,
    Running {
        binding: TickHandle,
        timestep: Timestep,
    },
}

/// One emulator session presented through one runtime texture.
pub struct Session<F: CoreFactory> {
    config: SessionConfig,
    texture: TextureId,
    platform: Platform,
    factory: F,
    core: Option<F::Core>,
    lifecycle: Lifecycle,
    frame: FrameBuffer,
    rgba: RgbaFrame,
    overlay: OverlayState,
    held: ButtonMask,
    frame_count: u64,
    tick_count: u64,
}

impl<F: CoreFactory> Session<F> {
    /// Create a stopped session presenting into `texture`.
    pub fn new(config: SessionConfig, texture: TextureId, platform: Platform, factory: F) -> Self {
        Self {
            config,
            texture,
            platform,
            factory,
            core: None,
            lifecycle: Lifecycle::Stopped,
            frame: FrameBuffer::new(),
            rgba: RgbaFrame::new(),
            overlay: OverlayState::default(),
            held: ButtonMask::default(),
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Start emulating `image` on a fresh core.
    ///
    /// An empty image is ignored. A running session is stopped first, so at
    /// most one tick binding ever exists. If the core rejects the image the
    /// session is left stopped.
    pub fn run(&mut self, image: &[u8]) -> Result<(), SessionError> {
        if image.is_empty() {
            return Ok(());
        }

        self.stop();

        let mut core = self.factory.construct(self.config.sample_rate);
        if let Err(reason) = core.load_program(image) {
            log::warn!("program image rejected: {reason}");
            return Err(SessionError::ProgramRejected(reason));
        }

        let binding = self.platform.ticks.bind();
        let now = self.platform.ticks.now();
        self.core = Some(core);
        self.lifecycle = Lifecycle::Running {
            binding,
            timestep: Timestep::new(self.config.frame_time, now),
        };
        log::info!(
            "session started: {} bytes, {}ms/frame, tick {binding:?}",
            image.len(),
            self.config.frame_time.as_millis()
        );
        Ok(())
    }

    /// Stop emulating. Does nothing if already stopped.
    ///
    /// Unbinds the tick, resets the core and releases the overlay. The
    /// texture stays; the last presented frame remains on it.
    pub fn stop(&mut self) {
        let Lifecycle::Running { binding, .. } =
            std::mem::replace(&mut self.lifecycle, Lifecycle::Stopped)
        else {
            return;
        };

        self.platform.ticks.unbind(binding);
        if let Some(core) = self.core.as_mut() {
            core.reset();
        }
        self.overlay.release(self.platform.overlay.as_mut());
        log::info!("session stopped, tick {binding:?} released");
    }

    /// Deliver a host tick tagged with `handle`.
    ///
    /// Ticks for any handle other than the live binding are stale and
    /// ignored.
    pub fn dispatch(&mut self, handle: TickHandle) -> Result<Option<TickReport>, SessionError> {
        if self.tick_handle() != Some(handle) {
            log::trace!("ignoring stale tick {handle:?}");
            return Ok(None);
        }
        self.tick()
    }

    /// Run one host tick. `None` while stopped.
    ///
    /// Samples input once, steps every frame that is due, then converts and
    /// uploads the latest frame exactly once, even when no frame was due.
    ///
    /// # Errors
    ///
    /// [`SessionError::UploadFailed`] if the surface rejects the upload. The
    /// session keeps running; stopping it is the caller's decision.
    pub fn tick(&mut self) -> Result<Option<TickReport>, SessionError> {
        let Lifecycle::Running { timestep, .. } = &mut self.lifecycle else {
            return Ok(None);
        };
        let Some(core) = self.core.as_mut() else {
            return Ok(None);
        };

        let now = self.platform.ticks.now();
        self.held = input::sample(&CONTROLS, self.platform.input.as_mut(), core);

        let frames_stepped = timestep.frames_due(now);
        for _ in 0..frames_stepped {
            core.step_frame(&mut self.frame);
        }
        let accumulated_ms = timestep.accumulated();

        self.frame_count += u64::from(frames_stepped);
        self.tick_count += 1;
        log::trace!("tick: {frames_stepped} frame(s), {accumulated_ms}ms carried");

        self.present()?;

        let overlay_drawn = self.config.controls_visible
            && self
                .overlay
                .draw(self.platform.overlay.as_mut(), &CONTROLS);

        Ok(Some(TickReport {
            frames_stepped,
            accumulated_ms,
            overlay_drawn,
        }))
    }

    fn present(&mut self) -> Result<(), SessionError> {
        framebuffer::convert(&self.frame, &mut self.rgba);
        if !self
            .platform
            .surface
            .upload_pixels(self.texture, self.rgba.as_bytes())
        {
            log::error!("pixel upload to {:?} failed", self.texture);
            return Err(SessionError::UploadFailed(self.texture));
        }
        self.platform.surface.commit(self.texture);
        Ok(())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running { .. })
    }

    /// The live tick binding, if running.
    #[must_use]
    pub fn tick_handle(&self) -> Option<TickHandle> {
        match self.lifecycle {
            Lifecycle::Running { binding, .. } => Some(binding),
            Lifecycle::Stopped => None,
        }
    }

    /// Milliseconds in the accumulator, if running.
    #[must_use]
    pub fn accumulated(&self) -> Option<i64> {
        match &self.lifecycle {
            Lifecycle::Running { timestep, .. } => Some(timestep.accumulated()),
            Lifecycle::Stopped => None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// The current core: live while running, reset after a stop.
    #[must_use]
    pub fn core(&self) -> Option<&F::Core> {
        self.core.as_ref()
    }

    /// Last completed native frame.
    #[must_use]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Last uploaded RGBA frame.
    #[must_use]
    pub fn presented(&self) -> &RgbaFrame {
        &self.rgba
    }

    /// Buttons held at the last sample.
    #[must_use]
    pub fn held_buttons(&self) -> ButtonMask {
        self.held
    }

    #[must_use]
    pub fn overlay_state(&self) -> OverlayState {
        self.overlay
    }

    /// Frames stepped over the session's lifetime.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Ticks handled over the session's lifetime.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl<F: CoreFactory> Drop for Session<F> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<F: CoreFactory> Observable for Session<F> {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "running" => Some(self.is_running().into()),
            "timestep.target_ms" => Some(self.config.frame_time.as_millis().into()),
            "timestep.accumulated_ms" => self.accumulated().map(Value::from),
            "frame_count" => Some(self.frame_count.into()),
            "tick_count" => Some(self.tick_count.into()),
            "input.buttons" => Some(self.held.bits().into()),
            "overlay.state" => Some(self.overlay.name().into()),
            "surface.texture" => Some(self.texture.0.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "running",
            "timestep.target_ms",
            "timestep.accumulated_ms",
            "frame_count",
            "tick_count",
            "input.buttons",
            "overlay.state",
            "surface.texture",
        ]
    }
}
