//! Key decoding for overlay navigation

/// Keys the overlays react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl NavKey {
    /// Decode a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => NavKey::Escape,
            "ArrowLeft" | "Left" => NavKey::ArrowLeft,
            "ArrowRight" | "Right" => NavKey::ArrowRight,
            _ => NavKey::Other,
        }
    }
}

/// Whether a layer consumed a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Consumed,
    Ignored,
}
