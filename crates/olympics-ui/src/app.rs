//! Main application state and TUI event loop for the Olympics dashboard.
//!
//! [`App`] owns the theme, the active section, the raw year / country /
//! sport selection and the results of the section's views. Every change of
//! section or selection re-queries the [`Dashboard`]; rendering only reads
//! the stored results.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info};

use olympics_core::models::{Selection, OVERALL};
use olympics_runtime::dashboard::{Dashboard, Section, ViewRequest, ViewResult};
use olympics_runtime::data_manager::LoadMetadata;

use crate::chart_view;
use crate::components::header::Header;
use crate::components::indicators::{SelectionIndicator, StatsIndicator};
use crate::table_view;
use crate::themes::Theme;

/// Outcome of one view of the active section.
///
/// Errors are kept as their user-facing message so one bad parameter does
/// not blank the other views.
pub type ViewOutcome = Result<ViewResult, String>;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Section currently on screen.
    pub section: Section,
    /// Raw selection values, as shown in the selection line.
    pub year: String,
    pub country: String,
    pub sport: String,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Views of the active section with their outcomes, in layout order.
    pub results: Vec<(ViewRequest, ViewOutcome)>,
    dashboard: Dashboard,
    metadata: LoadMetadata,
}

impl App {
    /// Construct the application and run the initial section's queries.
    pub fn new(
        dashboard: Dashboard,
        metadata: LoadMetadata,
        theme_name: &str,
        section: Section,
        year: String,
        country: String,
        sport: String,
    ) -> Self {
        let mut app = Self {
            theme: Theme::from_name(theme_name),
            section,
            year,
            country,
            sport,
            should_quit: false,
            results: Vec::new(),
            dashboard,
            metadata,
        };
        app.settle_country();
        app.refresh();
        app
    }

    /// Country-wise views need one region: an `Overall` country moves to the
    /// first region of the domain.
    fn settle_country(&mut self) {
        if self.section != Section::Country || self.country.trim() != OVERALL {
            return;
        }
        let first = self
            .dashboard
            .domains()
            .countries
            .iter()
            .find_map(|c| c.specific().cloned());
        if let Some(region) = first {
            debug!("Country-wise section defaults to {}", region);
            self.country = region;
        }
    }

    /// Re-run every view of the active section against the current selection.
    pub fn refresh(&mut self) {
        let requests = self.section.requests(&self.year, &self.country, &self.sport);
        self.results = requests
            .into_iter()
            .map(|request| {
                let outcome = self
                    .dashboard
                    .query(&request)
                    .map_err(|e| e.user_message());
                (request, outcome)
            })
            .collect();
        debug!(
            "Refreshed {} ({} views, {} cache hits so far)",
            self.section,
            self.results.len(),
            self.dashboard.cache_hits()
        );
    }

    /// Messages of the views that failed, deduplicated in view order.
    pub fn errors(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for (_, outcome) in &self.results {
            if let Err(message) = outcome {
                if !out.contains(&message.as_str()) {
                    out.push(message);
                }
            }
        }
        out
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press.
    ///
    /// `Tab` switches section, `←`/`→` the year, `↑`/`↓` the country and
    /// `[`/`]` the sport. `q`, `Q` or `Ctrl+C` quit.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let changed = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                false
            }
            KeyCode::Tab => {
                self.section = self.section.next();
                self.settle_country();
                true
            }
            KeyCode::Right => self.step_year(1),
            KeyCode::Left => self.step_year(-1),
            KeyCode::Down => self.step_country(1),
            KeyCode::Up => self.step_country(-1),
            KeyCode::Char(']') => self.step_sport(1),
            KeyCode::Char('[') => self.step_sport(-1),
            _ => false,
        };
        if changed {
            self.refresh();
        }
    }

    fn step_year(&mut self, step: isize) -> bool {
        let next = cycle(&self.dashboard.domains().years, &self.year, step);
        replace(&mut self.year, next)
    }

    fn step_country(&mut self, step: isize) -> bool {
        let next = cycle(&self.dashboard.domains().countries, &self.country, step);
        replace(&mut self.country, next)
    }

    fn step_sport(&mut self, step: isize) -> bool {
        let next = cycle(&self.dashboard.domains().sports, &self.sport, step);
        replace(&mut self.sport, next)
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Polls the terminal with a 250 ms timeout and redraws after every
    /// iteration; all queries run on this thread.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!("Dashboard started on {}", self.section);
        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let errors = self.errors();
        let banner_height = if errors.is_empty() { 0 } else { 1 };

        let [header_area, selection_area, banner_area, body] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Min(0),
        ])
        .areas(frame.area());

        let header = Header::new(self.section, &self.metadata, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), header_area);

        let selection = SelectionIndicator::new(&self.year, &self.country, &self.sport, &self.theme);
        frame.render_widget(Paragraph::new(selection.to_line()), selection_area);

        if let Some(first) = errors.first() {
            table_view::render_error_banner(frame, banner_area, first, &self.theme);
        }

        let areas = self.section_areas(body);
        for ((request, outcome), area) in self.results.iter().zip(areas) {
            self.render_view(frame, area, request, outcome);
        }
    }

    /// One area per view of the active section, in the order of
    /// [`Section::requests`].
    fn section_areas(&self, body: Rect) -> Vec<Rect> {
        let halves = |area: Rect| -> [Rect; 2] {
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area)
        };
        match self.section {
            Section::MedalTally => vec![body],
            Section::Overall => {
                let [stats, series, bottom] = Layout::vertical([
                    Constraint::Length(3),
                    Constraint::Percentage(40),
                    Constraint::Min(0),
                ])
                .areas(body);
                let [nations, events, athletes] = Layout::horizontal([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .areas(series);
                let [heatmap, ranking] = halves(bottom);
                vec![stats, nations, events, athletes, heatmap, ranking]
            }
            Section::Country => {
                let [top, bottom] =
                    Layout::vertical([Constraint::Percentage(40), Constraint::Min(0)]).areas(body);
                let [heatmap, ranking] = halves(bottom);
                vec![top, heatmap, ranking]
            }
            Section::Athlete => {
                let [top, bottom] =
                    Layout::vertical([Constraint::Percentage(50), Constraint::Min(0)]).areas(body);
                let [ages, gold] = halves(top);
                let [scatter, sexes] = halves(bottom);
                vec![ages, gold, scatter, sexes]
            }
        }
    }

    fn render_view(&self, frame: &mut Frame, area: Rect, request: &ViewRequest, outcome: &ViewOutcome) {
        let theme = &self.theme;
        let title = view_title(request);
        let result = match outcome {
            Ok(result) if !result.is_empty() => result,
            // The banner already names the failure.
            _ => return table_view::render_no_data(frame, area, &title, theme),
        };

        match result {
            ViewResult::MedalTally(tally) => {
                table_view::render_medal_tally(frame, area, &title, tally, theme)
            }
            ViewResult::OverallStatistics(stats) => {
                let line: Line = StatsIndicator::new(*stats, theme).to_line();
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", title));
                frame.render_widget(Paragraph::new(line).block(block), area);
            }
            ViewResult::TimeSeries { dimension, points } => {
                chart_view::render_time_series(frame, area, *dimension, points, theme)
            }
            ViewResult::Heatmap(heatmap) => {
                table_view::render_heatmap(frame, area, &title, heatmap, theme)
            }
            ViewResult::AthleteRanking(ranks) => {
                table_view::render_athlete_ranking(frame, area, &title, ranks, theme)
            }
            ViewResult::YearwiseMedals(years) => {
                chart_view::render_yearwise(frame, area, &title, years, theme)
            }
            ViewResult::CountryAthleteRanking(ranks) => {
                table_view::render_country_ranking(frame, area, &title, ranks, theme)
            }
            ViewResult::AthleteProfiles(profiles) => {
                chart_view::render_weight_v_height(frame, area, &title, profiles, theme)
            }
            ViewResult::MenVsWomen(splits) => {
                chart_view::render_men_vs_women(frame, area, splits, theme)
            }
            ViewResult::AgeDistribution(ages) => {
                chart_view::render_age_histogram(frame, area, ages, theme)
            }
            ViewResult::GoldMedalistAges(ages) => {
                table_view::render_gold_ages(frame, area, &title, ages, theme)
            }
            // Selector domains are not laid out by any section.
            ViewResult::CountryYearList(_) | ViewResult::SportList(_) => {
                table_view::render_no_data(frame, area, &title, theme)
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Value `step` places from `current` in `domain`, wrapping around.
///
/// A `current` value outside the domain restarts from `Overall`.
pub fn cycle<T: std::fmt::Display>(
    domain: &[Selection<T>],
    current: &str,
    step: isize,
) -> Option<String> {
    if domain.is_empty() {
        return None;
    }
    let len = domain.len() as isize;
    let next = match domain.iter().position(|s| s.to_string() == current.trim()) {
        Some(i) => (i as isize + step).rem_euclid(len),
        None => 0,
    };
    Some(domain[next as usize].to_string())
}

fn replace(slot: &mut String, next: Option<String>) -> bool {
    match next {
        Some(value) if value != *slot => {
            *slot = value;
            true
        }
        _ => false,
    }
}

/// Panel title of one view.
pub fn view_title(request: &ViewRequest) -> String {
    match request {
        ViewRequest::MedalTally { year, country } => {
            match (year.trim() == OVERALL, country.trim() == OVERALL) {
                (true, true) => "Overall Tally".to_string(),
                (false, true) => format!("Medal Tally in {} Olympics", year.trim()),
                (true, false) => format!("{} overall performance", country.trim()),
                (false, false) => {
                    format!("{} performance in {} Olympics", country.trim(), year.trim())
                }
            }
        }
        ViewRequest::NocMedalTally => "Medal Tally by NOC".to_string(),
        ViewRequest::CountryYearList => "Years and countries".to_string(),
        ViewRequest::SportList => "Sports".to_string(),
        ViewRequest::DataOverTime(dimension) => format!("{} over the years", dimension.label()),
        ViewRequest::OverallStatistics => "Top Statistics".to_string(),
        ViewRequest::EventsHeatmap => "No. of Events over time (every sport)".to_string(),
        ViewRequest::MostSuccessful { sport } => {
            format!("Most successful athletes ({})", sport.trim())
        }
        ViewRequest::YearwiseMedalTally { country } => {
            format!("{} Medal Tally over the years", country.trim())
        }
        ViewRequest::CountryEventHeatmap { country } => {
            format!("{} excels in the following sports", country.trim())
        }
        ViewRequest::MostSuccessfulCountrywise { country } => {
            format!("Top 10 athletes of {}", country.trim())
        }
        ViewRequest::WeightVHeight { sport } => format!("Height vs Weight ({})", sport.trim()),
        ViewRequest::MenVsWomen => "Men vs Women participation".to_string(),
        ViewRequest::AgeDistribution => "Distribution of Age".to_string(),
        ViewRequest::GoldMedalistAges => "Distribution of Age wrt Sports (Gold Medalist)".to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
