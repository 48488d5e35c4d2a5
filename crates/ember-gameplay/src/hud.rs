//! Interface to the UI layer.
//!
//! The core never reaches for a global player controller. Whoever owns the
//! widgets implements [`Hud`] and hands it in at construction.

use ember_common::Vec3;
use parking_lot::Mutex;

/// Signals the character core sends to the UI.
pub trait Hud: Send + Sync {
    /// Show the health bar of the current combat target.
    fn show_target_health_bar(&self);

    /// Hide the target health bar.
    fn hide_target_health_bar(&self);

    /// Latest position of the combat target, for anchoring the health bar.
    fn update_target_location(&self, _location: Vec3) {}

    /// Show the pause menu.
    fn display_pause_menu(&self);

    /// Hide the pause menu.
    fn remove_pause_menu(&self);

    /// Hand input back to gameplay (hide cursor, game-only input mode).
    fn enter_game_input_mode(&self) {}
}

/// HUD that ignores every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHud;

impl Hud for NullHud {
    fn show_target_health_bar(&self) {}
    fn hide_target_health_bar(&self) {}
    fn display_pause_menu(&self) {}
    fn remove_pause_menu(&self) {}
}

/// A single recorded HUD signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HudSignal {
    /// Target bar shown.
    ShowTargetHealthBar,
    /// Target bar hidden.
    HideTargetHealthBar,
    /// Target moved.
    TargetLocation(Vec3),
    /// Pause menu shown.
    DisplayPauseMenu,
    /// Pause menu hidden.
    RemovePauseMenu,
    /// Input returned to gameplay.
    GameInputMode,
}

/// HUD that records signals in order. Used by tests and the headless demo.
#[derive(Debug, Default)]
pub struct RecordingHud {
    signals: Mutex<Vec<HudSignal>>,
}

impl RecordingHud {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded signals, leaving the recorder empty.
    pub fn take(&self) -> Vec<HudSignal> {
        std::mem::take(&mut *self.signals.lock())
    }

    /// Most recent signal, if any.
    #[must_use]
    pub fn last(&self) -> Option<HudSignal> {
        self.signals.lock().last().copied()
    }

    /// Check if a signal was recorded since the last `take`.
    #[must_use]
    pub fn saw(&self, signal: HudSignal) -> bool {
        self.signals.lock().contains(&signal)
    }

    fn push(&self, signal: HudSignal) {
        self.signals.lock().push(signal);
    }
}

impl Hud for RecordingHud {
    fn show_target_health_bar(&self) {
        self.push(HudSignal::ShowTargetHealthBar);
    }

    fn hide_target_health_bar(&self) {
        self.push(HudSignal::HideTargetHealthBar);
    }

    fn update_target_location(&self, location: Vec3) {
        self.push(HudSignal::TargetLocation(location));
    }

    fn display_pause_menu(&self) {
        self.push(HudSignal::DisplayPauseMenu);
    }

    fn remove_pause_menu(&self) {
        self.push(HudSignal::RemovePauseMenu);
    }

    fn enter_game_input_mode(&self) {
        self.push(HudSignal::GameInputMode);
    }
}
