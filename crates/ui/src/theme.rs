use paintflash_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale alpha by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (f32::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemeMode::Dark => dark_visuals(),
            ThemeMode::Light => egui::Visuals::light(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> ResolvedColor {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
}

/// `token` at `opacity`, ready for the painter.
pub fn resolve_faded(token: ThemeToken, mode: ThemeMode, opacity: f32) -> egui::Color32 {
    resolve(token, mode).with_opacity(opacity).to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        HighlightOk => ResolvedColor::rgb(0xa6, 0xe3, 0xa1),    // Green
        HighlightWarn => ResolvedColor::rgb(0xf9, 0xe2, 0xaf),  // Yellow
        HighlightError => ResolvedColor::rgb(0xf3, 0x8b, 0xa8), // Red
        HighlightOkFill => ResolvedColor::rgba(0xa6, 0xe3, 0xa1, 40),
        HighlightWarnFill => ResolvedColor::rgba(0xf9, 0xe2, 0xaf, 40),
        HighlightErrorFill => ResolvedColor::rgba(0xf3, 0x8b, 0xa8, 40),
        HighlightLabelText => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        HighlightLabelBackground => ResolvedColor::rgba(0xcd, 0xd6, 0xf4, 220),

        TextPrimary => ResolvedColor::rgb(0xcd, 0xd6, 0xf4), // Text
        TextMuted => ResolvedColor::rgb(0xa6, 0xad, 0xc8),   // Subtext0

        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        Surface => ResolvedColor::rgb(0x18, 0x18, 0x25),    // Mantle
        Border => ResolvedColor::rgb(0x31, 0x32, 0x44),     // Surface0

        ComponentFill => ResolvedColor::rgb(0x1e, 0x1e, 0x2e),   // Base
        ComponentBorder => ResolvedColor::rgb(0x45, 0x47, 0x5a), // Surface1
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        HighlightOk => ResolvedColor::rgb(39, 174, 96),
        HighlightWarn => ResolvedColor::rgb(230, 126, 34),
        HighlightError => ResolvedColor::rgb(230, 57, 70),
        HighlightOkFill => ResolvedColor::rgba(39, 174, 96, 35),
        HighlightWarnFill => ResolvedColor::rgba(230, 126, 34, 35),
        HighlightErrorFill => ResolvedColor::rgba(230, 57, 70, 35),
        HighlightLabelText => ResolvedColor::rgb(255, 255, 255),
        HighlightLabelBackground => ResolvedColor::rgba(20, 20, 30, 200),

        TextPrimary => ResolvedColor::rgb(20, 20, 30),
        TextMuted => ResolvedColor::rgb(100, 100, 110),

        Background => ResolvedColor::rgb(248, 249, 250),
        Surface => ResolvedColor::rgb(241, 243, 245),
        Border => ResolvedColor::rgb(222, 226, 230),

        ComponentFill => ResolvedColor::rgb(255, 255, 255),
        ComponentBorder => ResolvedColor::rgb(210, 210, 220),
    }
}

fn dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = egui::Color32::from_rgb(0x1e, 0x1e, 0x2e);
    v.window_fill = egui::Color32::from_rgb(0x18, 0x18, 0x25);
    v.extreme_bg_color = egui::Color32::from_rgb(0x11, 0x11, 0x1b);
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x31, 0x32, 0x44);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x45, 0x47, 0x5a);
    v.warn_fg_color = egui::Color32::from_rgb(0xf9, 0xe2, 0xaf);
    v.error_fg_color = egui::Color32::from_rgb(0xf3, 0x8b, 0xa8);
    v
}
