//! Pause menu state.
//!
//! While the menu is up the character's world tick is frozen. Input that
//! toggles the menu still gets through.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hud::Hud;

/// Visibility of the in-game pause menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseMenu {
    visible: bool,
}

impl PauseMenu {
    /// Hidden menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the menu is showing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check if the world should keep updating.
    #[must_use]
    pub fn should_update_world(&self) -> bool {
        !self.visible
    }

    /// Show the menu if hidden, hide it if shown. Returns the new visibility.
    pub fn toggle(&mut self, hud: &dyn Hud) -> bool {
        if self.visible {
            self.close(hud);
        } else {
            self.open(hud);
        }
        self.visible
    }

    /// Show the menu.
    pub fn open(&mut self, hud: &dyn Hud) {
        if self.visible {
            return;
        }
        self.visible = true;
        hud.display_pause_menu();
        debug!("pause menu opened");
    }

    /// Hide the menu and give input back to gameplay.
    pub fn close(&mut self, hud: &dyn Hud) {
        if !self.visible {
            return;
        }
        self.visible = false;
        hud.remove_pause_menu();
        hud.enter_game_input_mode();
        debug!("pause menu closed");
    }
}
