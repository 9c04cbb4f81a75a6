//! Tabular views for the dashboard TUI.
//!
//! Renders bordered [`ratatui::widgets::Table`]s for medal tallies, athlete
//! rankings and sport × year heatmaps, plus the shared "no data" and error
//! placeholders.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use olympics_core::formatting::{format_count, format_optional};
use olympics_data::aggregator::{
    AthleteRank, CountryAthleteRank, Heatmap, MedalTally, SportAges, TallyGrouping,
};

use crate::components::medal_bar::{CountBar, MedalShareBar};
use crate::themes::Theme;

/// Shown in place of a view whose selection matched nothing.
pub const NO_DATA_MESSAGE: &str = "No data for this selection";

/// Width of one year column in a heatmap.
const HEATMAP_COLUMN_WIDTH: u16 = 5;

/// Width of the sport column in a heatmap.
const HEATMAP_LABEL_WIDTH: u16 = 22;

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

fn striped(theme: &Theme, i: usize) -> ratatui::style::Style {
    if i % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

// ── Medal tally ──────────────────────────────────────────────────────────────

/// Render a medal table with a share bar per row and a totals row.
pub fn render_medal_tally(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tally: &MedalTally,
    theme: &Theme,
) {
    let key_label = match tally.grouping {
        TallyGrouping::Region => "Region",
        TallyGrouping::Year => "Year",
        TallyGrouping::Noc => "NOC",
    };
    let header = Row::new(
        [key_label, "Gold", "Silver", "Bronze", "Total", "Share"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let mut rows: Vec<Row> = tally
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                Cell::from(truncate(&row.key.to_string(), 28)),
                Cell::from(format_count(row.gold as u64)).style(theme.medal_gold),
                Cell::from(format_count(row.silver as u64)).style(theme.medal_silver),
                Cell::from(format_count(row.bronze as u64)).style(theme.medal_bronze),
                Cell::from(format_count(row.total as u64)),
                Cell::from(
                    MedalShareBar::new(row.gold, row.silver, row.bronze, theme)
                        .with_width(20)
                        .to_line(),
                ),
            ])
            .style(striped(theme, i))
        })
        .collect();

    let (gold, silver, bronze, total) = tally.rows.iter().fold((0u64, 0u64, 0u64, 0u64), |acc, r| {
        (
            acc.0 + r.gold as u64,
            acc.1 + r.silver as u64,
            acc.2 + r.bronze as u64,
            acc.3 + r.total as u64,
        )
    });
    rows.push(
        Row::new(vec![
            Cell::from(format!("TOTAL ({})", tally.rows.len())),
            Cell::from(format_count(gold)),
            Cell::from(format_count(silver)),
            Cell::from(format_count(bronze)),
            Cell::from(format_count(total)),
            Cell::from(""),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(30),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(title))
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Rankings ─────────────────────────────────────────────────────────────────

/// Render the overall most-successful-athletes ranking.
pub fn render_athlete_ranking(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    ranks: &[AthleteRank],
    theme: &Theme,
) {
    let header = Row::new(
        ["#", "Athlete", "Medals", "Sport", "Region"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );
    let rows: Vec<Row> = ranks
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate(&r.name, 34)),
                Cell::from(r.medals.to_string()).style(theme.value),
                Cell::from(truncate(&r.sport, 18)),
                Cell::from(format_optional(r.region.as_deref())),
            ])
            .style(striped(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(35),
        Constraint::Length(7),
        Constraint::Length(19),
        Constraint::Min(10),
    ];
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(bordered(title))
            .style(theme.text),
        area,
    );
}

/// Render one country's most-successful-athletes ranking.
pub fn render_country_ranking(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    ranks: &[CountryAthleteRank],
    theme: &Theme,
) {
    let header = Row::new(
        ["#", "Athlete", "Medals", "Sport"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );
    let rows: Vec<Row> = ranks
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate(&r.name, 34)),
                Cell::from(r.medals.to_string()).style(theme.value),
                Cell::from(truncate(&r.sport, 20)),
            ])
            .style(striped(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(35),
        Constraint::Length(7),
        Constraint::Min(10),
    ];
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(bordered(title))
            .style(theme.text),
        area,
    );
}

/// Render gold-medallist counts and median ages per sport.
pub fn render_gold_ages(frame: &mut Frame, area: Rect, title: &str, ages: &[SportAges], theme: &Theme) {
    let max = ages.iter().map(|s| s.ages.len() as u64).max().unwrap_or(0);
    let header = Row::new(
        ["Sport", "Median age", "Gold medallists"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );
    let rows: Vec<Row> = ages
        .iter()
        .filter(|s| !s.ages.is_empty())
        .enumerate()
        .map(|(i, s)| {
            // Ages are sorted ascending.
            let median = s.ages[s.ages.len() / 2];
            Row::new(vec![
                Cell::from(truncate(&s.sport, 22)),
                Cell::from(median.to_string()),
                Cell::from(
                    CountBar::new(s.ages.len() as u64, max, theme.medal_gold, theme)
                        .with_width(16)
                        .to_line(),
                ),
            ])
            .style(striped(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(23),
        Constraint::Length(11),
        Constraint::Min(20),
    ];
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(bordered(title))
            .style(theme.text),
        area,
    );
}

// ── Heatmap ──────────────────────────────────────────────────────────────────

/// Number of year columns that fit in `area`, always at least one.
fn visible_columns(area: Rect, total: usize) -> usize {
    let usable = area.width.saturating_sub(HEATMAP_LABEL_WIDTH + 3);
    ((usable / HEATMAP_COLUMN_WIDTH) as usize).clamp(1, total.max(1))
}

/// Render a sport × year matrix with cells coloured by magnitude.
///
/// When the area is too narrow the earliest years are dropped.
pub fn render_heatmap(frame: &mut Frame, area: Rect, title: &str, heatmap: &Heatmap, theme: &Theme) {
    let shown = visible_columns(area, heatmap.columns.len());
    let first = heatmap.columns.len().saturating_sub(shown);
    let max = heatmap.max_value();

    let header = Row::new(
        std::iter::once(Cell::from("Sport").style(theme.table_header)).chain(
            heatmap.columns[first..]
                .iter()
                .map(|y| Cell::from(format!("{:>4}", y)).style(theme.table_header)),
        ),
    );

    let rows: Vec<Row> = heatmap
        .rows
        .iter()
        .zip(&heatmap.cells)
        .map(|(sport, cells)| {
            Row::new(
                std::iter::once(Cell::from(truncate(sport, HEATMAP_LABEL_WIDTH as usize))).chain(
                    cells[first..].iter().map(|v| {
                        Cell::from(format!("{:>4}", v)).style(theme.heat_style(*v, max))
                    }),
                ),
            )
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(HEATMAP_LABEL_WIDTH))
        .chain(std::iter::repeat(Constraint::Length(HEATMAP_COLUMN_WIDTH - 1)).take(shown))
        .collect();

    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(bordered(title))
            .style(theme.text),
        area,
    );
}

// ── Placeholders ─────────────────────────────────────────────────────────────

/// Render the empty-result placeholder for one view.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA_MESSAGE, theme.info)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(bordered(title)),
        area,
    );
}

/// Render a one-line error banner.
pub fn render_error_banner(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(message.to_string(), theme.error)))
            .wrap(Wrap { trim: true }),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;
    use olympics_data::aggregator::{TallyKey, TallyRow};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tally() -> MedalTally {
        MedalTally {
            grouping: TallyGrouping::Region,
            rows: vec![
                TallyRow {
                    key: TallyKey::Region("France".to_string()),
                    gold: 1,
                    silver: 0,
                    bronze: 0,
                    total: 1,
                },
                TallyRow {
                    key: TallyKey::Region("Italy".to_string()),
                    gold: 0,
                    silver: 1,
                    bronze: 0,
                    total: 1,
                },
            ],
        }
    }

    // ── truncate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("France", 10), "France");
        assert_eq!(truncate("France", 6), "France");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("Great Britain", 6), "Great…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_counts_display_width() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate("李宁李宁", 5), "李宁…");
    }

    // ── render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_medal_tally_shows_rows_and_total() {
        let mut terminal = Terminal::new(TestBackend::new(110, 10)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_medal_tally(frame, frame.area(), "Medal Tally", &tally(), &theme))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Region"));
        assert!(text.contains("France"));
        assert!(text.contains("Italy"));
        assert!(text.contains("TOTAL (2)"));
    }

    #[test]
    fn test_render_medal_tally_year_grouping_header() {
        let mut terminal = Terminal::new(TestBackend::new(110, 10)).unwrap();
        let theme = Theme::dark();
        let tally = MedalTally {
            grouping: TallyGrouping::Year,
            rows: vec![TallyRow {
                key: TallyKey::Year(1992),
                gold: 3,
                silver: 1,
                bronze: 0,
                total: 4,
            }],
        };
        terminal
            .draw(|frame| render_medal_tally(frame, frame.area(), "France", &tally, &theme))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Year"));
        assert!(text.contains("1992"));
    }

    #[test]
    fn test_render_rankings_do_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(90, 12)).unwrap();
        let theme = Theme::light();
        let ranks = vec![AthleteRank {
            name: "Michael Fred Phelps, II".to_string(),
            medals: 28,
            sport: "Swimming".to_string(),
            region: Some("USA".to_string()),
        }];
        let country = vec![CountryAthleteRank {
            name: "Edoardo Mangiarotti".to_string(),
            medals: 13,
            sport: "Fencing".to_string(),
        }];
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_athlete_ranking(frame, area, "Most successful", &ranks, &theme);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Phelps"));
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_country_ranking(frame, area, "Top athletes", &country, &theme);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Mangiarotti"));
    }

    #[test]
    fn test_render_heatmap_drops_earliest_years_when_narrow() {
        let heatmap = Heatmap {
            rows: vec!["Judo".to_string()],
            columns: (0..30).map(|i| 1896 + 4 * i).collect(),
            cells: vec![vec![1; 30]],
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_heatmap(frame, frame.area(), "Heatmap", &heatmap, &theme))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("2012"), "latest year must be visible");
        assert!(!text.contains("1896"), "earliest year must be cut");
    }

    #[test]
    fn test_visible_columns_at_least_one() {
        assert_eq!(visible_columns(Rect::new(0, 0, 10, 5), 30), 1);
        assert_eq!(visible_columns(Rect::new(0, 0, 200, 5), 3), 3);
    }

    #[test]
    fn test_render_gold_ages_skips_empty_sports() {
        let ages = vec![
            SportAges {
                sport: "Swimming".to_string(),
                ages: vec![17, 19, 21],
            },
            SportAges {
                sport: "Polo".to_string(),
                ages: vec![],
            },
        ];
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_gold_ages(frame, frame.area(), "Gold ages", &ages, &theme))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Swimming"));
        assert!(!text.contains("Polo"));
    }

    #[test]
    fn test_render_no_data_message() {
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_no_data(frame, frame.area(), "Medal Tally", &theme))
            .unwrap();
        assert!(buffer_text(&terminal).contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_render_error_banner() {
        let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                render_error_banner(frame, frame.area(), "Invalid selection: Unknown year: 1993", &theme)
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Invalid selection"));
    }
}
