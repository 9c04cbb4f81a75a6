use olympics_core::models::{Medal, MedalOutcome, Sex};
use olympics_data::aggregator::Dimension;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Every style used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,
    /// Title of the active section tab.
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub error: Style,

    // ── Medals ───────────────────────────────────────────────────────────────
    pub medal_gold: Style,
    pub medal_silver: Style,
    pub medal_bronze: Style,
    pub no_medal: Style,

    // ── Heatmap cells ────────────────────────────────────────────────────────
    pub heat_empty: Style,
    pub heat_low: Style,
    pub heat_medium: Style,
    pub heat_high: Style,

    // ── Chart series ─────────────────────────────────────────────────────────
    pub series_nations: Style,
    pub series_events: Style,
    pub series_athletes: Style,
    pub series_male: Style,
    pub series_female: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            medal_gold: Style::default().fg(Color::Yellow),
            medal_silver: Style::default().fg(Color::Gray),
            medal_bronze: Style::default().fg(Color::Rgb(205, 127, 50)),
            no_medal: Style::default().fg(Color::DarkGray),

            heat_empty: Style::default().fg(Color::DarkGray),
            heat_low: Style::default().fg(Color::Green),
            heat_medium: Style::default().fg(Color::Yellow),
            heat_high: Style::default().fg(Color::Red),

            series_nations: Style::default().fg(Color::Cyan),
            series_events: Style::default().fg(Color::Magenta),
            series_athletes: Style::default().fg(Color::Green),
            series_male: Style::default().fg(Color::Blue),
            series_female: Style::default().fg(Color::Magenta),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and saturated accents so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            medal_gold: Style::default().fg(Color::Rgb(184, 134, 11)),
            medal_silver: Style::default().fg(Color::DarkGray),
            medal_bronze: Style::default().fg(Color::Rgb(139, 69, 19)),
            no_medal: Style::default().fg(Color::Gray),

            heat_empty: Style::default().fg(Color::Gray),
            heat_low: Style::default().fg(Color::Green),
            heat_medium: Style::default().fg(Color::Rgb(184, 134, 11)),
            heat_high: Style::default().fg(Color::Red),

            series_nations: Style::default().fg(Color::Blue),
            series_events: Style::default().fg(Color::Magenta),
            series_athletes: Style::default().fg(Color::Green),
            series_male: Style::default().fg(Color::Blue),
            series_female: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// No bold modifiers, for minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::White),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red),

            medal_gold: Style::default().fg(Color::Yellow),
            medal_silver: Style::default().fg(Color::White),
            medal_bronze: Style::default().fg(Color::Red),
            no_medal: Style::default().fg(Color::DarkGray),

            heat_empty: Style::default().fg(Color::DarkGray),
            heat_low: Style::default().fg(Color::Green),
            heat_medium: Style::default().fg(Color::Yellow),
            heat_high: Style::default().fg(Color::Red),

            series_nations: Style::default().fg(Color::Cyan),
            series_events: Style::default().fg(Color::Magenta),
            series_athletes: Style::default().fg(Color::Green),
            series_male: Style::default().fg(Color::Blue),
            series_female: Style::default().fg(Color::Magenta),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    pub fn medal_style(&self, medal: Medal) -> Style {
        match medal {
            Medal::Gold => self.medal_gold,
            Medal::Silver => self.medal_silver,
            Medal::Bronze => self.medal_bronze,
        }
    }

    pub fn outcome_style(&self, outcome: MedalOutcome) -> Style {
        match outcome {
            MedalOutcome::Won(medal) => self.medal_style(medal),
            MedalOutcome::NoMedal => self.no_medal,
        }
    }

    /// Heatmap cell style for `value` relative to the matrix maximum.
    ///
    /// * `0`               → `heat_empty`
    /// * `< 34 %` of max   → `heat_low`
    /// * `34–67 %` of max  → `heat_medium`
    /// * `≥ 67 %` of max   → `heat_high`
    pub fn heat_style(&self, value: u32, max: u32) -> Style {
        if value == 0 || max == 0 {
            return self.heat_empty;
        }
        let ratio = value as f64 / max as f64;
        if ratio >= 0.67 {
            self.heat_high
        } else if ratio >= 0.34 {
            self.heat_medium
        } else {
            self.heat_low
        }
    }

    pub fn series_style(&self, dimension: Dimension) -> Style {
        match dimension {
            Dimension::Region => self.series_nations,
            Dimension::Event => self.series_events,
            Dimension::Athlete => self.series_athletes,
        }
    }

    pub fn sex_style(&self, sex: Sex) -> Style {
        match sex {
            Sex::Male => self.series_male,
            Sex::Female => self.series_female,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
