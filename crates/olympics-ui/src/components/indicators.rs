use crate::themes::Theme;
use olympics_core::formatting::format_count;
use olympics_data::aggregator::OverallStats;
use ratatui::text::{Line, Span};

// ── StatsIndicator ───────────────────────────────────────────────────────────

/// Headline counts of the whole table on one line.
///
/// Format: `"Editions 29 · Hosts 23 · Sports 52 · Events 651 · Athletes 116,122 · Nations 205"`
pub struct StatsIndicator<'a> {
    pub stats: OverallStats,
    pub theme: &'a Theme,
}

impl<'a> StatsIndicator<'a> {
    pub fn new(stats: OverallStats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }

    fn entries(&self) -> [(&'static str, usize); 6] {
        let s = &self.stats;
        [
            ("Editions", s.editions),
            ("Hosts", s.hosts),
            ("Sports", s.sports),
            ("Events", s.events),
            ("Athletes", s.athletes),
            ("Nations", s.nations),
        ]
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(18);
        for (i, (label, value)) in self.entries().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", self.theme.separator));
            }
            spans.push(Span::styled(format!("{} ", label), self.theme.label));
            spans.push(Span::styled(format_count(value as u64), self.theme.value));
        }
        Line::from(spans)
    }
}

// ── SelectionIndicator ───────────────────────────────────────────────────────

/// The current year / country / sport selection with the keys that change it.
///
/// Format: `"Year ◂ 1992 ▸  Country ▴ France ▾  Sport [ Judo ]"`
pub struct SelectionIndicator<'a> {
    pub year: &'a str,
    pub country: &'a str,
    pub sport: &'a str,
    pub theme: &'a Theme,
}

impl<'a> SelectionIndicator<'a> {
    pub fn new(year: &'a str, country: &'a str, sport: &'a str, theme: &'a Theme) -> Self {
        Self {
            year,
            country,
            sport,
            theme,
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled("Year ◂ ", self.theme.label),
            Span::styled(self.year, self.theme.value),
            Span::styled(" ▸  Country ▴ ", self.theme.label),
            Span::styled(self.country, self.theme.value),
            Span::styled(" ▾  Sport [ ", self.theme.label),
            Span::styled(self.sport, self.theme.value),
            Span::styled(" ]", self.theme.label),
            Span::styled("   Tab: section  q: quit", self.theme.dim),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
