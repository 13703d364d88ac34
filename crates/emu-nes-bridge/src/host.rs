//! Host-facing entry points.
//!
//! Initialization is two-phase. `initialize` asks the UI layer for its audio
//! sample rate; the answer comes back later through
//! `complete_initialization`, which resolves the configuration, creates the
//! runtime texture and builds the session. Until then every other call is a
//! no-op.

use emu_core::{CoreFactory, InitChannel, MetadataSource, TickHandle};

use crate::config::{InitPayload, SessionConfig};
use crate::error::{ResourceError, Result};
use crate::framebuffer::{FB_HEIGHT, FB_WIDTH};
use crate::session::{Platform, Session, TickReport};

enum HostState<F: CoreFactory> {
    Uninitialized,
    Initializing,
    Ready(Session<F>),
}

/// The emulator as seen by the embedding application.
pub struct NesHost<F: CoreFactory> {
    state: HostState<F>,
}

impl<F: CoreFactory> NesHost<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: HostState::Uninitialized,
        }
    }

    /// Ask the UI layer for its init response. Ignored unless uninitialized.
    pub fn initialize(&mut self, channel: &mut dyn InitChannel) {
        if !matches!(self.state, HostState::Uninitialized) {
            return;
        }
        self.state = HostState::Initializing;
        channel.request_init();
    }

    /// Finish initialization with the UI layer's response.
    ///
    /// Ignored unless initializing. Every metadata field is validated before
    /// any resource is created. On error nothing is kept and the host goes
    /// back to uninitialized.
    pub fn complete_initialization(
        &mut self,
        payload: InitPayload,
        metadata: &dyn MetadataSource,
        platform: Platform,
        factory: F,
    ) -> Result<()> {
        if !matches!(self.state, HostState::Initializing) {
            return Ok(());
        }

        match build_session(payload, metadata, platform, factory) {
            Ok(session) => {
                self.state = HostState::Ready(session);
                Ok(())
            }
            Err(e) => {
                log::error!("initialization failed: {e}");
                self.state = HostState::Uninitialized;
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, HostState::Ready(_))
    }

    #[must_use]
    pub fn is_initializing(&self) -> bool {
        matches!(self.state, HostState::Initializing)
    }

    /// Texture dictionary name, or `""` before initialization completes.
    #[must_use]
    pub fn presentation_target_dict(&self) -> &str {
        self.session()
            .map_or("", |s| s.config().texture_dict.as_str())
    }

    /// Texture name, or `""` before initialization completes.
    #[must_use]
    pub fn presentation_target_name(&self) -> &str {
        self.session()
            .map_or("", |s| s.config().texture_name.as_str())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.session().is_some_and(Session::is_running)
    }

    /// Start `image`. Ignored before initialization completes.
    pub fn run(&mut self, image: &[u8]) -> Result<()> {
        if let Some(session) = self.session_mut() {
            session.run(image)?;
        }
        Ok(())
    }

    /// Stop the session, if any.
    pub fn stop(&mut self) {
        if let Some(session) = self.session_mut() {
            session.stop();
        }
    }

    /// Deliver a host tick. Stale handles and ticks before initialization
    /// are ignored.
    pub fn dispatch_tick(&mut self, handle: TickHandle) -> Result<Option<TickReport>> {
        match self.session_mut() {
            Some(session) => Ok(session.dispatch(handle)?),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session<F>> {
        match &self.state {
            HostState::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session<F>> {
        match &mut self.state {
            HostState::Ready(session) => Some(session),
            _ => None,
        }
    }
}

impl<F: CoreFactory> Default for NesHost<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn build_session<F: CoreFactory>(
    payload: InitPayload,
    metadata: &dyn MetadataSource,
    mut platform: Platform,
    factory: F,
) -> Result<Session<F>> {
    let config = SessionConfig::resolve(metadata, payload)?;

    let dictionary = platform
        .surface
        .create_dictionary(&config.texture_dict)
        .ok_or_else(|| ResourceError::Dictionary(config.texture_dict.clone()))?;
    let texture = platform
        .surface
        .create_texture(dictionary, &config.texture_name, FB_WIDTH, FB_HEIGHT)
        .ok_or_else(|| ResourceError::Texture {
            dictionary: config.texture_dict.clone(),
            name: config.texture_name.clone(),
        })?;

    log::info!(
        "presenting into {}/{} ({texture:?}), {}ms/frame, controls {}",
        config.texture_dict,
        config.texture_name,
        config.frame_time.as_millis(),
        if config.controls_visible { "shown" } else { "hidden" }
    );
    Ok(Session::new(config, texture, platform, factory))
}
