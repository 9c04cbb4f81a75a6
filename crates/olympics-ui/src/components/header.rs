use crate::themes::Theme;
use olympics_core::formatting::format_count;
use olympics_runtime::dashboard::Section;
use olympics_runtime::data_manager::LoadMetadata;
use ratatui::text::{Line, Span};

/// Decorative rings placed either side of the application title.
pub const RINGS: &str = "◯ ◯ ◯ ◯ ◯";

/// Dashboard header rendering four lines:
///
/// 1. Application title with ring decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Section tabs, the active one highlighted.
/// 4. Dataset facts in `[ rows | regions | loaded ]` format.
pub struct Header<'a> {
    pub section: Section,
    pub metadata: &'a LoadMetadata,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(section: Section, metadata: &'a LoadMetadata, theme: &'a Theme) -> Self {
        Self {
            section,
            metadata,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        let mut tabs: Vec<Span<'a>> = Vec::new();
        for (i, section) in Section::ALL.iter().enumerate() {
            if i > 0 {
                tabs.push(Span::styled(" │ ", self.theme.separator));
            }
            let style = if *section == self.section {
                self.theme.tab_active
            } else {
                self.theme.tab_inactive
            };
            tabs.push(Span::styled(section.title(), style));
        }

        vec![
            Line::from(vec![
                Span::styled(RINGS, self.theme.header_accent),
                Span::styled(" SUMMER OLYMPICS ANALYSIS ", self.theme.header),
                Span::styled(RINGS, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(tabs),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(
                    format!("{} records", format_count(self.metadata.canonical_rows as u64)),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} NOCs", format_count(self.metadata.regions as u64)),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("loaded {}", self.metadata.loaded_at.format("%H:%M:%S UTC")),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
