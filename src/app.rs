use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io::Stdout;
use std::time::{Duration, Instant};

use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};

use crate::fetch::{Alert, WeatherSnapshot};
use crate::pairing::ForecastPair;
use crate::render::{current_lines, headline, period_summary, sky_lines, Renderer, View, MISSING};

const TICK: Duration = Duration::from_millis(250);

pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiRenderer {
    pub fn new(terminal: Terminal<CrosstermBackend<Stdout>>) -> Self {
        Self { terminal }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Renderer for TuiRenderer {
    fn render(&mut self, view: &View) -> anyhow::Result<()> {
        self.terminal.draw(|f| draw(f, view))?;
        Ok(())
    }
}

/// What the refresh loop does with one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    Redraw,
    Ignore,
}

pub fn action_for(event: &Event) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::Ignore,
        },
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::Ignore,
    }
}

/// Draws `get_data`'s result, then refreshes every `refresh` or on `r` until `q`.
///
/// The timer is checked on every pass, so a stream of ignored events cannot
/// hold back the scheduled refresh.
pub fn run_app<R: Renderer>(
    renderer: &mut R,
    refresh: Duration,
    mut get_data: impl FnMut() -> View,
) -> anyhow::Result<()> {
    renderer.render(&View::Loading)?;
    let mut view = get_data();
    renderer.render(&view)?;
    let mut last_fetch = Instant::now();

    loop {
        if event::poll(TICK)? {
            match action_for(&event::read()?) {
                Action::Quit => return Ok(()),
                Action::Refresh => {
                    renderer.render(&View::Loading)?;
                    view = get_data();
                    last_fetch = Instant::now();
                    renderer.render(&view)?;
                }
                Action::Redraw => renderer.render(&view)?,
                Action::Ignore => {}
            }
        }

        if last_fetch.elapsed() >= refresh {
            view = get_data();
            last_fetch = Instant::now();
            renderer.render(&view)?;
        }
    }
}

fn card(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Yellow),
        ))
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

fn key_value_table<'a>(title: &'a str, lines: Vec<(&'static str, String)>) -> Table<'a> {
    let mut rows = vec![Row::new(vec![Cell::from("")])];
    for (label, value) in lines {
        rows.push(Row::new(vec![
            Cell::from(format!(" {label}")),
            Cell::from(value).style(Style::default().fg(Color::Green)),
        ]));
    }
    Table::new(rows, [Constraint::Length(13), Constraint::Fill(1)]).block(card(title))
}

fn display_headline(snapshot: &WeatherSnapshot) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                snapshot.station.station_id.clone(),
                Style::default().fg(Color::Blue),
            ),
            Span::raw(" : "),
            Span::styled(headline(snapshot), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(format!(
            " {} at {}",
            snapshot.station_name,
            snapshot.observed_at.format("%d-%m-%Y %H:%M")
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

fn display_alert(alert: &Alert) -> Vec<Line<'_>> {
    let row = |label: &str, value: &str| {
        Line::from(vec![
            Span::raw(format!(" {label:10}")),
            Span::styled(value.to_string(), Style::default().fg(Color::Green)),
        ])
    };
    vec![
        Line::from(""),
        row("Event", &alert.event),
        row("Severity", &alert.severity),
        row("Certainty", &alert.certainty),
        row("Onset", alert.onset.as_deref().unwrap_or(MISSING)),
        row("Ends", alert.ends.as_deref().unwrap_or(MISSING)),
        row("Headline", alert.headline.as_deref().unwrap_or(MISSING)),
    ]
}

fn display_pair(pair: &ForecastPair) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];
    for period in pair.day().into_iter().chain(pair.night()) {
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                period.name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(period_summary(period), Style::default().fg(Color::Green)),
        ]));
    }
    lines
}

fn draw_snapshot(f: &mut Frame, area: Rect, snapshot: &WeatherSnapshot) {
    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    f.render_widget(display_headline(snapshot), vert_layout[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vert_layout[1]);

    let lchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(chunks[0]);

    f.render_widget(
        key_value_table("Current Conditions", current_lines(snapshot)),
        lchunks[0],
    );
    f.render_widget(key_value_table("Air & Sky", sky_lines(snapshot)), lchunks[1]);

    let alert_items = if snapshot.alerts.is_empty() {
        vec![ListItem::new(format!("\n  {MISSING}"))]
    } else {
        snapshot
            .alerts
            .iter()
            .map(|alert| ListItem::new(display_alert(alert)))
            .collect()
    };
    f.render_widget(List::new(alert_items).block(card("Alerts")), lchunks[2]);

    let forecast_items: Vec<ListItem> = snapshot
        .forecast
        .iter()
        .map(|pair| ListItem::new(display_pair(pair)))
        .collect();
    f.render_widget(
        List::new(forecast_items).block(card("Forecast")),
        chunks[1],
    );
}

fn draw_message(f: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(color),
        )),
        Line::from(""),
        Line::from(" press r to retry, q to quit"),
    ])
    .wrap(Wrap { trim: false })
    .block(card(title));
    f.render_widget(paragraph, area);
}

pub fn draw(f: &mut Frame, view: &View) {
    let area = Layout::default()
        .margin(1)
        .constraints([Constraint::Min(0)])
        .split(f.area())[0];

    match view {
        View::Loading => draw_message(f, area, "Weather", "Loading...", Color::Yellow),
        View::Unavailable(reason) => draw_message(
            f,
            area,
            "Weather",
            &format!("Could not load weather: {reason}"),
            Color::Red,
        ),
        View::Ready(snapshot) => draw_snapshot(f, area, snapshot),
    }
}
