//! Screen-space placement of the menu panel and buttons, shared by drawing and hit-testing.

use glam::Vec2;
use sdl2::rect::{Point, Rect};

use crate::constants::ui::{ACTION_BUTTON_SIZE, CORNER_BUTTON_MARGIN, CORNER_BUTTON_SIZE, PANEL_SIZE};
use crate::events::GameCommand;
use crate::systems::components::Viewport;
use crate::systems::state::GameStage;

const CORNER_BUTTON_GAP: i32 = 12;
const PANEL_EDGE_MARGIN: u32 = 32;
const ACTION_BUTTON_INSET: i32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Backdrop of the title and results screens.
    pub panel: Rect,
    /// Begin on the title screen, retry on the results screen.
    pub action: Rect,
    pub mute: Rect,
    pub exit: Rect,
}

impl Layout {
    pub fn new(viewport: &Viewport) -> Self {
        let width = viewport.width as i32;
        let height = viewport.height as i32;
        let corner = CORNER_BUTTON_SIZE as i32;

        let exit = Rect::new(
            width - CORNER_BUTTON_MARGIN - corner,
            CORNER_BUTTON_MARGIN,
            CORNER_BUTTON_SIZE,
            CORNER_BUTTON_SIZE,
        );
        let mute = Rect::new(
            exit.x() - CORNER_BUTTON_GAP - corner,
            CORNER_BUTTON_MARGIN,
            CORNER_BUTTON_SIZE,
            CORNER_BUTTON_SIZE,
        );

        let panel_width = PANEL_SIZE.0.min(viewport.width.saturating_sub(PANEL_EDGE_MARGIN)).max(1);
        let panel_height = PANEL_SIZE.1.min(viewport.height.saturating_sub(PANEL_EDGE_MARGIN)).max(1);
        let panel = Rect::from_center((width / 2, height / 2), panel_width, panel_height);

        let action_width = ACTION_BUTTON_SIZE.0.min(panel_width.saturating_sub(32)).max(1);
        let action = Rect::new(
            width / 2 - action_width as i32 / 2,
            panel.bottom() - ACTION_BUTTON_INSET - ACTION_BUTTON_SIZE.1 as i32,
            action_width,
            ACTION_BUTTON_SIZE.1,
        );

        Self {
            panel,
            action,
            mute,
            exit,
        }
    }

    /// Whether the title/results panel is on screen in `stage`.
    pub fn menu_visible(stage: GameStage) -> bool {
        matches!(stage, GameStage::Start | GameStage::GameOver)
    }

    /// The command of the button under `point`, if any.
    ///
    /// The corner buttons are always live; the action button only while the menu is visible.
    pub fn button_at(&self, point: Vec2, stage: GameStage) -> Option<GameCommand> {
        let point = Point::new(point.x.floor() as i32, point.y.floor() as i32);

        if self.exit.contains_point(point) {
            Some(GameCommand::Exit)
        } else if self.mute.contains_point(point) {
            Some(GameCommand::ToggleMute)
        } else if Self::menu_visible(stage) && self.action.contains_point(point) {
            Some(GameCommand::Begin)
        } else {
            None
        }
    }
}
