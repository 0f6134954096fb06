use std::collections::{HashMap, HashSet};

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{NonSendMut, Res, ResMut},
};
use glam::Vec2;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
    mouse::MouseButton,
    EventPump,
};
use tracing::debug;

use crate::events::{GameCommand, GameEvent};
use crate::systems::components::{Viewport, WindowFocus};
use crate::systems::layout::Layout;
use crate::systems::state::GameSession;

/// Platform-neutral input, already stripped of everything the game ignores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimpleInputEvent {
    KeyDown(Keycode),
    KeyUp(Keycode),
    /// Primary button went down at a window position.
    PointerDown(Vec2),
    PointerUp,
    /// The pointer left the window, which counts as letting go.
    PointerLeave,
    Quit,
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, GameCommand>,
    /// Keys that act like holding the pointer down.
    press_keys: HashSet<Keycode>,
    held_keys: HashSet<Keycode>,
    pointer_held: bool,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Flight
        key_bindings.insert(Keycode::Space, GameCommand::Press);
        key_bindings.insert(Keycode::Up, GameCommand::Press);
        key_bindings.insert(Keycode::W, GameCommand::Press);

        // Menus and session
        key_bindings.insert(Keycode::Return, GameCommand::Begin);
        key_bindings.insert(Keycode::KpEnter, GameCommand::Begin);
        key_bindings.insert(Keycode::M, GameCommand::ToggleMute);
        key_bindings.insert(Keycode::F11, GameCommand::ToggleFullscreen);
        key_bindings.insert(Keycode::Escape, GameCommand::Exit);
        key_bindings.insert(Keycode::Q, GameCommand::Exit);

        let press_keys = HashSet::from([Keycode::Space, Keycode::Up, Keycode::W]);

        Self {
            key_bindings,
            press_keys,
            held_keys: HashSet::new(),
            pointer_held: false,
        }
    }
}

impl Bindings {
    /// Whether any press key or the pointer is currently held.
    pub fn is_holding(&self) -> bool {
        self.pointer_held || !self.held_keys.is_empty()
    }

    /// Forgets everything held, e.g. when the window loses focus and key-ups may never arrive.
    pub fn release_all(&mut self) -> bool {
        let was_holding = self.is_holding();
        self.held_keys.clear();
        self.pointer_held = false;
        was_holding
    }
}

/// Translates one frame of input into game commands.
///
/// `hit_test` resolves a pointer position to the on-screen button under it, if any.
/// Every new press edge emits [`GameCommand::Press`], even while another input is held,
/// so each tap jumps. Holds stack for release: [`GameCommand::Release`] is only emitted
/// once nothing is held anymore.
pub fn process_input_events(
    bindings: &mut Bindings,
    events: &[SimpleInputEvent],
    hit_test: impl Fn(Vec2) -> Option<GameCommand>,
) -> Vec<GameEvent> {
    let mut out = Vec::new();

    for event in events {
        match *event {
            SimpleInputEvent::Quit => out.push(GameCommand::Exit.into()),
            SimpleInputEvent::KeyDown(key) => {
                if bindings.press_keys.contains(&key) {
                    if bindings.held_keys.insert(key) {
                        out.push(GameCommand::Press.into());
                    }
                } else if let Some(command) = bindings.key_bindings.get(&key).copied() {
                    out.push(command.into());
                }
            }
            SimpleInputEvent::KeyUp(key) => {
                if bindings.held_keys.remove(&key) && !bindings.is_holding() {
                    out.push(GameCommand::Release.into());
                }
            }
            SimpleInputEvent::PointerDown(position) => {
                if let Some(command) = hit_test(position) {
                    out.push(command.into());
                } else if !bindings.pointer_held {
                    bindings.pointer_held = true;
                    out.push(GameCommand::Press.into());
                }
            }
            SimpleInputEvent::PointerUp | SimpleInputEvent::PointerLeave => {
                if bindings.pointer_held {
                    bindings.pointer_held = false;
                    if !bindings.is_holding() {
                        out.push(GameCommand::Release.into());
                    }
                }
            }
        }
    }

    out
}

/// Drains the SDL event queue and forwards the resulting commands.
pub fn input_system(
    mut bindings: ResMut<Bindings>,
    mut writer: EventWriter<GameEvent>,
    mut pump: NonSendMut<EventPump>,
    mut focus: ResMut<WindowFocus>,
    viewport: Res<Viewport>,
    session: Res<GameSession>,
) {
    let mut simple = Vec::new();
    let mut lost_focus = false;

    for event in pump.poll_iter() {
        match event {
            Event::Quit { .. } => simple.push(SimpleInputEvent::Quit),
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => simple.push(SimpleInputEvent::KeyDown(key)),
            Event::KeyUp {
                keycode: Some(key),
                repeat: false,
                ..
            } => simple.push(SimpleInputEvent::KeyUp(key)),
            // Touch arrives here too, since SDL synthesizes mouse events from fingers
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => simple.push(SimpleInputEvent::PointerDown(Vec2::new(x as f32, y as f32))),
            Event::MouseButtonUp {
                mouse_btn: MouseButton::Left,
                ..
            } => simple.push(SimpleInputEvent::PointerUp),
            Event::Window { win_event, .. } => match win_event {
                WindowEvent::Leave => simple.push(SimpleInputEvent::PointerLeave),
                WindowEvent::FocusGained => focus.0 = true,
                WindowEvent::FocusLost => {
                    focus.0 = false;
                    lost_focus = true;
                }
                _ => {}
            },
            _ => {}
        }
    }

    let layout = Layout::new(&viewport);
    let stage = session.stage;
    let commands = process_input_events(&mut bindings, &simple, |point| layout.button_at(point, stage));
    for command in commands {
        writer.write(command);
    }

    if lost_focus && bindings.release_all() {
        debug!("Window lost focus while holding, releasing");
        writer.write(GameCommand::Release.into());
    }
}
