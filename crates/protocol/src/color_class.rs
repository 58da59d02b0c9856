use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;

/// Severity of one observed render, resolved by the caller before the
/// highlight is added. Renderers map it to an outline and a fill tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    Ok,
    Warn,
    Error,
}

impl ColorClass {
    pub fn outline_token(self) -> ThemeToken {
        match self {
            ColorClass::Ok => ThemeToken::HighlightOk,
            ColorClass::Warn => ThemeToken::HighlightWarn,
            ColorClass::Error => ThemeToken::HighlightError,
        }
    }

    pub fn fill_token(self) -> ThemeToken {
        match self {
            ColorClass::Ok => ThemeToken::HighlightOkFill,
            ColorClass::Warn => ThemeToken::HighlightWarnFill,
            ColorClass::Error => ThemeToken::HighlightErrorFill,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorClass::Ok => "ok",
            ColorClass::Warn => "warn",
            ColorClass::Error => "error",
        }
    }
}

impl std::fmt::Display for ColorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
