use serde::Serialize;

/// Dark theme colors shared by the page stylesheet and the charts.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Theme {
    pub bg: &'static str,
    pub card: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub gold: &'static str,
    pub cyan: &'static str,
    /// Slice colors for the per-symbol distribution.
    pub symbol_palette: [&'static str; 9],
}

pub const THEME: Theme = Theme {
    bg: "#0D1117",
    card: "#161B22",
    border: "#21262D",
    text: "#C9D1D9",
    muted: "#8B949E",
    accent: "#58A6FF",
    green: "#3FB950",
    red: "#F85149",
    gold: "#FFD54F",
    cyan: "#06B6D4",
    symbol_palette: [
        "#2196F3", "#FF5722", "#4CAF50", "#9C27B0", "#FF9800", "#00BCD4", "#E91E63", "#795548",
        "#607D8B",
    ],
};

impl Theme {
    /// The theme as CSS custom properties for the page's `:root` rule.
    pub fn css_variables(&self) -> String {
        [
            ("bg", self.bg),
            ("card", self.card),
            ("border", self.border),
            ("text", self.text),
            ("muted", self.muted),
            ("accent", self.accent),
            ("green", self.green),
            ("red", self.red),
            ("gold", self.gold),
            ("cyan", self.cyan),
        ]
        .iter()
        .map(|(name, color)| format!("--{name}: {color};"))
        .collect::<Vec<_>>()
        .join(" ")
    }
}
