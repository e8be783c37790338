use serde::Serialize;

/// Page palette. Every colour is a `#rrggbb` string dropped into CSS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeConfig {
    pub name: String,
    // Backgrounds
    pub bg_primary: String, pub bg_secondary: String,
    // Borders
    pub border_normal: String,
    // Text
    pub text_primary: String, pub text_muted: String, pub text_accent: String,
    // Highlights
    pub today_bg: String, pub today_fg: String,
    pub note_fg: String, pub weekend_fg: String,
}

impl ThemeConfig {
    /// Look up a built-in theme; unknown names fall back to the default.
    pub fn by_name(name: &str) -> Self {
        Self::all_themes()
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .unwrap_or_else(|| {
                tracing::warn!("Unknown theme {name:?}, using default");
                ThemeConfig::default()
            })
    }

    pub fn all_themes() -> Vec<ThemeConfig> {
        vec![
            ThemeConfig::default(),    // Catppuccin Mocha
            ThemeConfig::nord(),
            ThemeConfig::gruvbox(),
            ThemeConfig::dracula(),
        ]
    }

    // ── Built-in themes ───────────────────────────────────────────────────────

    pub fn nord() -> Self { Self {
        name: "nord".into(),
        bg_primary: "#2e3440".into(), bg_secondary: "#3b4252".into(),
        border_normal: "#4c566a".into(),
        text_primary: "#eceff4".into(), text_muted: "#4c566a".into(), text_accent: "#88c0d0".into(),
        today_bg: "#88c0d0".into(), today_fg: "#2e3440".into(),
        note_fg: "#a3be8c".into(), weekend_fg: "#bf616a".into(),
    }}

    pub fn gruvbox() -> Self { Self {
        name: "gruvbox".into(),
        bg_primary: "#282828".into(), bg_secondary: "#1d2021".into(),
        border_normal: "#504945".into(),
        text_primary: "#ebdbb2".into(), text_muted: "#7c6f64".into(), text_accent: "#d79921".into(),
        today_bg: "#d79921".into(), today_fg: "#282828".into(),
        note_fg: "#b8bb26".into(), weekend_fg: "#fb4934".into(),
    }}

    pub fn dracula() -> Self { Self {
        name: "dracula".into(),
        bg_primary: "#282a36".into(), bg_secondary: "#21222c".into(),
        border_normal: "#6272a4".into(),
        text_primary: "#f8f8f2".into(), text_muted: "#6272a4".into(), text_accent: "#bd93f9".into(),
        today_bg: "#50fa7b".into(), today_fg: "#282a36".into(),
        note_fg: "#50fa7b".into(), weekend_fg: "#ff5555".into(),
    }}
}

impl Default for ThemeConfig {
    fn default() -> Self { Self {
        name: "catppuccin-mocha".into(),
        bg_primary: "#1e1e2e".into(), bg_secondary: "#181825".into(),
        border_normal: "#45475a".into(),
        text_primary: "#cdd6f4".into(), text_muted: "#6c7086".into(), text_accent: "#89b4fa".into(),
        today_bg: "#cba6f7".into(), today_fg: "#1e1e2e".into(),
        note_fg: "#a6e3a1".into(), weekend_fg: "#f38ba8".into(),
    }}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(ThemeConfig::by_name("Nord"), ThemeConfig::nord());
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(ThemeConfig::by_name("solarized"), ThemeConfig::default());
    }
}
