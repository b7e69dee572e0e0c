use fringe_core::displace::clamp_displacement;
use fringe_core::presets::Intensity;

// ---------------------------------------------------------------------------
// Key — windowing-library-independent key representation
// ---------------------------------------------------------------------------

/// A keyboard key, independent of any windowing library.
///
/// `main.rs` maps `winit::keyboard::PhysicalKey` → `Key`; everything else
/// in the input pipeline works purely with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Space,
    Equal, // = / + (same physical key; Shift state ignored)
    Minus, // - / _ (same physical key; Shift state ignored)
    R,
    Q,
    Escape,
}

// ---------------------------------------------------------------------------
// InputAction — what the app does in response to input
// ---------------------------------------------------------------------------

/// High-level action produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    LoadIntensity(Intensity),
    DisplacementUp,
    DisplacementDown,
    /// Draw the scene straight to the surface, skipping the effect.
    ToggleBypass,
    Reset,
    Quit,
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Translate a `Key` press into an `InputAction`, if the key is mapped.
    pub fn on_key(&self, key: Key) -> Option<InputAction> {
        match key {
            Key::Digit1 => Some(InputAction::LoadIntensity(Intensity::Off)),
            Key::Digit2 => Some(InputAction::LoadIntensity(Intensity::Subtle)),
            Key::Digit3 => Some(InputAction::LoadIntensity(Intensity::Classic)),
            Key::Digit4 => Some(InputAction::LoadIntensity(Intensity::Heavy)),
            Key::Space => Some(InputAction::ToggleBypass),
            Key::Equal => Some(InputAction::DisplacementUp),
            Key::Minus => Some(InputAction::DisplacementDown),
            Key::R => Some(InputAction::Reset),
            Key::Q | Key::Escape => Some(InputAction::Quit),
        }
    }
}

// ---------------------------------------------------------------------------
// Displacement stepping (pure, testable)
// ---------------------------------------------------------------------------

/// How far one `=`/`-` press nudges the displacement.
pub const DISPLACEMENT_STEP: f32 = 0.01;

/// Nudge a displacement by `delta`, staying inside the valid range.
pub fn step_displacement(current: f32, delta: f32) -> f32 {
    clamp_displacement(current + delta)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
