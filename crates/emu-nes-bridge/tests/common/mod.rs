//! Recording fakes for every host collaborator.
//!
//! All fakes write into one shared journal so tests can assert on the exact
//! order of calls across collaborators.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use emu_core::{
    CoreFactory, DictionaryId, EmulatorCore, FrameSink, InputChannel, InputSource, Millis,
    OverlayId, OverlayRenderer, PresentationSurface, TextureId, TickHandle, TickSource,
};
use emu_nes_bridge::framebuffer::FB_PIXELS;
use emu_nes_bridge::{FrameTime, Platform, Session, SessionConfig};

pub const TEXTURE: TextureId = TextureId(7);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Construct(u32),
    Load(usize),
    Step,
    Reset,
    Button { port: u8, button: u8, pressed: bool },
    Bind(TickHandle),
    Unbind(TickHandle),
    CreateDictionary(String),
    CreateTexture(String),
    Upload(usize),
    Commit,
    DisableChannel(u8),
    OverlayRequest,
    OverlayDraw,
    OverlayRelease,
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

impl Journal {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// ---------------------------------------------------------------------------
// Emulator core
// ---------------------------------------------------------------------------

/// Fills each frame with its own frame number.
pub struct FakeCore {
    journal: Journal,
    frames: u32,
    reject: bool,
}

impl FakeCore {
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl EmulatorCore for FakeCore {
    fn load_program(&mut self, image: &[u8]) -> Result<(), String> {
        self.journal.push(Call::Load(image.len()));
        if self.reject {
            Err("bad iNES header".to_string())
        } else {
            Ok(())
        }
    }

    fn step_frame(&mut self, sink: &mut dyn FrameSink) {
        self.frames += 1;
        self.journal.push(Call::Step);
        sink.frame(&vec![self.frames; FB_PIXELS]);
    }

    fn reset(&mut self) {
        self.frames = 0;
        self.journal.push(Call::Reset);
    }

    fn set_button(&mut self, port: u8, button: u8, pressed: bool) {
        self.journal.push(Call::Button {
            port,
            button,
            pressed,
        });
    }
}

pub struct FakeFactory {
    journal: Journal,
    pub reject: bool,
}

impl CoreFactory for FakeFactory {
    type Core = FakeCore;

    fn construct(&mut self, sample_rate: u32) -> FakeCore {
        self.journal.push(Call::Construct(sample_rate));
        FakeCore {
            journal: self.journal.clone(),
            frames: 0,
            reject: self.reject,
        }
    }
}

// ---------------------------------------------------------------------------
// Host services
// ---------------------------------------------------------------------------

struct FakeTicks {
    journal: Journal,
    clock: Rc<Cell<i64>>,
    live: Rc<RefCell<HashSet<TickHandle>>>,
    next: u32,
}

impl TickSource for FakeTicks {
    fn bind(&mut self) -> TickHandle {
        self.next += 1;
        let handle = TickHandle(self.next);
        self.live.borrow_mut().insert(handle);
        self.journal.push(Call::Bind(handle));
        handle
    }

    fn unbind(&mut self, handle: TickHandle) {
        self.live.borrow_mut().remove(&handle);
        self.journal.push(Call::Unbind(handle));
    }

    fn now(&self) -> Millis {
        Millis(self.clock.get())
    }
}

struct FakeSurface {
    journal: Journal,
    refuse_dictionary: bool,
    refuse_texture: bool,
    fail_upload: Rc<Cell<bool>>,
    uploaded: Rc<RefCell<Vec<u8>>>,
}

impl PresentationSurface for FakeSurface {
    fn create_dictionary(&mut self, name: &str) -> Option<DictionaryId> {
        self.journal.push(Call::CreateDictionary(name.to_string()));
        (!self.refuse_dictionary).then_some(DictionaryId(1))
    }

    fn create_texture(
        &mut self,
        _dictionary: DictionaryId,
        name: &str,
        width: u32,
        height: u32,
    ) -> Option<TextureId> {
        assert_eq!((width, height), (256, 240));
        self.journal.push(Call::CreateTexture(name.to_string()));
        (!self.refuse_texture).then_some(TEXTURE)
    }

    fn upload_pixels(&mut self, texture: TextureId, rgba: &[u8]) -> bool {
        assert_eq!(texture, TEXTURE);
        self.journal.push(Call::Upload(rgba.len()));
        if self.fail_upload.get() {
            return false;
        }
        let mut uploaded = self.uploaded.borrow_mut();
        uploaded.clear();
        uploaded.extend_from_slice(rgba);
        true
    }

    fn commit(&mut self, _texture: TextureId) {
        self.journal.push(Call::Commit);
    }
}

struct FakeInput {
    journal: Journal,
    held: Rc<RefCell<HashSet<u16>>>,
}

impl InputSource for FakeInput {
    fn disable_channel(&mut self, channel: InputChannel) {
        self.journal.push(Call::DisableChannel(channel.0));
    }

    fn is_held(&self, channel: InputChannel, id: u16) -> bool {
        channel == InputChannel(2) && self.held.borrow().contains(&id)
    }
}

struct FakeOverlay {
    journal: Journal,
    polls: Cell<u32>,
    load_polls: u32,
    next: u32,
}

impl OverlayRenderer for FakeOverlay {
    fn request(&mut self, _movie: &str) -> OverlayId {
        self.next += 1;
        self.polls.set(0);
        self.journal.push(Call::OverlayRequest);
        OverlayId(self.next)
    }

    fn is_ready(&self, _overlay: OverlayId) -> bool {
        self.polls.set(self.polls.get() + 1);
        self.polls.get() > self.load_polls
    }

    fn clear(&mut self, _overlay: OverlayId) {}

    fn set_slot(&mut self, _overlay: OverlayId, _index: usize, _name: &str, _label: &str) {}

    fn finalize(&mut self, _overlay: OverlayId) {}

    fn present_fullscreen(&mut self, _overlay: OverlayId, _tint: [u8; 4]) {
        self.journal.push(Call::OverlayDraw);
    }

    fn release(&mut self, _overlay: OverlayId) {
        self.journal.push(Call::OverlayRelease);
    }
}

// ---------------------------------------------------------------------------
// Rig
// ---------------------------------------------------------------------------

/// Handles onto the fakes' shared state.
#[derive(Clone, Default)]
pub struct Rig {
    pub journal: Journal,
    pub clock: Rc<Cell<i64>>,
    pub live_ticks: Rc<RefCell<HashSet<TickHandle>>>,
    pub held: Rc<RefCell<HashSet<u16>>>,
    pub fail_upload: Rc<Cell<bool>>,
    pub uploaded: Rc<RefCell<Vec<u8>>>,
    pub refuse_dictionary: bool,
    pub refuse_texture: bool,
    pub overlay_load_polls: u32,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            clock: Rc::new(Cell::new(10_000)),
            ..Self::default()
        }
    }

    pub fn platform(&self) -> Platform {
        Platform {
            surface: Box::new(FakeSurface {
                journal: self.journal.clone(),
                refuse_dictionary: self.refuse_dictionary,
                refuse_texture: self.refuse_texture,
                fail_upload: Rc::clone(&self.fail_upload),
                uploaded: Rc::clone(&self.uploaded),
            }),
            ticks: Box::new(FakeTicks {
                journal: self.journal.clone(),
                clock: Rc::clone(&self.clock),
                live: Rc::clone(&self.live_ticks),
                next: 0,
            }),
            input: Box::new(FakeInput {
                journal: self.journal.clone(),
                held: Rc::clone(&self.held),
            }),
            overlay: Box::new(FakeOverlay {
                journal: self.journal.clone(),
                polls: Cell::new(0),
                load_polls: self.overlay_load_polls,
                next: 0,
            }),
        }
    }

    pub fn factory(&self) -> FakeFactory {
        FakeFactory {
            journal: self.journal.clone(),
            reject: false,
        }
    }

    pub fn advance(&self, ms: i64) {
        self.clock.set(self.clock.get() + ms);
    }

    pub fn hold(&self, input: u16) {
        self.held.borrow_mut().insert(input);
    }

    pub fn release(&self, input: u16) {
        self.held.borrow_mut().remove(&input);
    }

    pub fn live_tick_count(&self) -> usize {
        self.live_ticks.borrow().len()
    }

    /// A stopped session presenting into [`TEXTURE`].
    pub fn session(&self, frame_ms: u32, controls_visible: bool) -> Session<FakeFactory> {
        Session::new(
            config(frame_ms, controls_visible),
            TEXTURE,
            self.platform(),
            self.factory(),
        )
    }
}

pub fn config(frame_ms: u32, controls_visible: bool) -> SessionConfig {
    SessionConfig {
        texture_dict: "nes_txd".to_string(),
        texture_name: "nes_screen".to_string(),
        frame_time: FrameTime::from_millis(frame_ms).expect("non-zero frame time"),
        controls_visible,
        sample_rate: 48_000,
    }
}

pub fn rom() -> Vec<u8> {
    let mut rom = vec![0u8; 16 + 16_384 + 8_192];
    rom[0..4].copy_from_slice(b"NES\x1a");
    rom[4] = 1;
    rom[5] = 1;
    rom
}
