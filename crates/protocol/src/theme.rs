use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Highlight outlines, one per severity
    HighlightOk,
    HighlightWarn,
    HighlightError,

    // Faint translucent tints drawn under the outlines
    HighlightOkFill,
    HighlightWarnFill,
    HighlightErrorFill,

    HighlightLabelText,
    HighlightLabelBackground,

    // Host chrome (demo components, status bars)
    Background,
    Surface,
    Border,
    TextPrimary,
    TextMuted,
    ComponentFill,
    ComponentBorder,
}
