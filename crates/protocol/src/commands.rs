use serde::{Deserialize, Serialize};

use crate::id::SharedText;
use crate::theme::ThemeToken;
use crate::types::Rect;

/// A single, stateless render instruction.
///
/// The overlay emits a `Vec<RenderCommand>` per frame. Renderers consume
/// the list sequentially; later commands paint over earlier ones. None of
/// these commands carry hit-test targets, so a renderer never needs to
/// route pointer input to the layer it paints them on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a rectangle with an optional translucent fill, an optional
    /// outline and an optional text label in its top-left corner.
    ///
    /// `opacity` in `[0, 1]` multiplies every color of the command.
    DrawRect {
        rect: Rect,
        fill: Option<ThemeToken>,
        outline: Option<ThemeToken>,
        outline_width: f64,
        label: Option<SharedText>,
        opacity: f32,
    },

    /// Begin a logical group (the overlay layer). Renderers may use this
    /// for layer separation.
    BeginGroup {
        id: SharedText,
        label: Option<SharedText>,
    },

    /// End the current group.
    EndGroup,
}

impl RenderCommand {
    pub fn opacity(&self) -> Option<f32> {
        match self {
            RenderCommand::DrawRect { opacity, .. } => Some(*opacity),
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => None,
        }
    }
}
