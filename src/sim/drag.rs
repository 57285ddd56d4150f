//! Pointer drag controller for the jerry can
//!
//! Idle -> Dragging on a pointer-down inside the player, back to Idle on
//! pointer-up or cancel. Only horizontal movement; the can stays on the floor.

use serde::{Deserialize, Serialize};

use super::state::{Container, Player};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer x at drag start (container pixels)
        start_x: f32,
        /// Player left edge at drag start
        initial_left: f32,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DragController {
    pub state: DragState,
}

impl DragController {
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begin a drag if the pointer landed on an enabled player.
    /// Returns true when a drag started.
    pub fn pointer_down(&mut self, player: &Player, container: &Container, x: f32, y: f32) -> bool {
        if !player.enabled || self.is_dragging() {
            return false;
        }
        if !player.rect(container).contains(x, y) {
            return false;
        }
        self.state = DragState::Dragging {
            start_x: x,
            initial_left: player.left,
        };
        true
    }

    /// Follow the pointer horizontally, clamped to the container
    pub fn pointer_move(&mut self, player: &mut Player, container: &Container, x: f32) {
        if !player.enabled {
            return;
        }
        if let DragState::Dragging {
            start_x,
            initial_left,
        } = self.state
        {
            player.set_left(initial_left + (x - start_x), container);
        }
    }

    /// Pointer released or cancelled
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// Drop any in-progress drag (player disabled, session reset)
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
