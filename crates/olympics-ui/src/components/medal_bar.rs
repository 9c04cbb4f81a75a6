use crate::themes::Theme;
use olympics_core::formatting::{format_count, percentage};
use olympics_core::models::Medal;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Configuration controlling visual appearance of a bar.
pub struct BarConfig {
    /// Width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── MedalShareBar ────────────────────────────────────────────────────────────

/// A proportional three-colour bar showing the gold / silver / bronze split
/// of a medal total.
///
/// Each medal is a contiguous segment whose width is proportional to its
/// share of the total; the counts follow the bar.
pub struct MedalShareBar<'a> {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> MedalShareBar<'a> {
    pub fn new(gold: u32, silver: u32, bronze: u32, theme: &'a Theme) -> Self {
        Self {
            gold,
            silver,
            bronze,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    fn counts(&self) -> [(Medal, u32); 3] {
        [
            (Medal::Gold, self.gold),
            (Medal::Silver, self.silver),
            (Medal::Bronze, self.bronze),
        ]
    }

    /// Render the bar as a [`Line`].
    ///
    /// A zero total renders as an all-empty bar.
    pub fn to_line(&self) -> Line<'a> {
        let total = self.gold + self.silver + self.bronze;
        let mut spans: Vec<Span<'a>> = Vec::new();
        let mut used: u16 = 0;

        for (medal, count) in self.counts() {
            let share = percentage(count as f64, total as f64, 1);
            let chars = ((share / 100.0) * self.config.width as f64).round() as u16;
            let chars = chars.min(self.config.width - used);
            if chars > 0 {
                let segment: String =
                    std::iter::repeat_n(self.config.filled_char, chars as usize).collect();
                spans.push(Span::styled(segment, self.theme.medal_style(medal)));
                used += chars;
            }
        }

        let rest = self.config.width - used;
        if rest > 0 {
            let segment: String =
                std::iter::repeat_n(self.config.empty_char, rest as usize).collect();
            spans.push(Span::styled(segment, self.theme.dim));
        }

        spans.push(Span::raw(" "));
        for (medal, count) in self.counts() {
            spans.push(Span::styled(
                format!("{} {} ", medal.as_str().chars().next().unwrap_or(' '), count),
                self.theme.medal_style(medal),
            ));
        }

        Line::from(spans)
    }
}

// ── CountBar ─────────────────────────────────────────────────────────────────

/// Horizontal bar for one value relative to the largest value in a list.
pub struct CountBar<'a> {
    pub value: u64,
    pub max: u64,
    pub style: Style,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> CountBar<'a> {
    pub fn new(value: u64, max: u64, style: Style, theme: &'a Theme) -> Self {
        Self {
            value,
            max,
            style,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    pub fn to_line(&self) -> Line<'a> {
        let share = percentage(self.value as f64, self.max as f64, 1).min(100.0);
        let filled = ((share / 100.0) * self.config.width as f64) as u16;
        let empty = self.config.width.saturating_sub(filled);

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        Line::from(vec![
            Span::styled(filled_str, self.style),
            Span::styled(empty_str, self.theme.dim),
            Span::styled(format!(" {}", format_count(self.value)), self.theme.label),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
