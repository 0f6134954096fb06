use bevy_ecs::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Leave the game and hand control back to the host.
    Exit,
    /// Start a round from the title screen, or retry after a crash.
    Begin,
    /// Pointer or key went down outside any button.
    Press,
    /// Pointer or key went up, or the pointer left the window.
    Release,
    ToggleMute,
    ToggleFullscreen,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}
