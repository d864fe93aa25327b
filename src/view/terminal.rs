use std::io;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};

use crate::types::{ChartMeta, HistoryPoint};
use crate::view::state::{
    bounds, hover_lines, price_labels, price_series, time_labels, volume_series, ViewState,
};

/// Opens the interactive chart and blocks until the user quits.
pub fn show(points: &[HistoryPoint], meta: &ChartMeta) -> io::Result<()> {
    enable_raw_mode()?;
    // Armed before anything else can fail; restores on error returns and panics.
    let _restore = RestoreGuard::new(restore_terminal);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = ViewState::new(points.len());
    run_loop(&mut terminal, points, meta, &mut state)
}

/// Runs `restore` exactly once when dropped.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Each step is attempted even if an earlier one fails.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = execute!(io::stdout(), Show);
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    points: &[HistoryPoint],
    meta: &ChartMeta,
    state: &mut ViewState,
) -> io::Result<()> {
    let price = price_series(points);
    let volume = volume_series(points);

    loop {
        terminal.draw(|f| render(f, points, meta, &price, &volume, state))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Right | KeyCode::Char('l') => state.next(),
                KeyCode::Left | KeyCode::Char('h') => state.prev(),
                KeyCode::Home | KeyCode::Char('g') => state.first(),
                KeyCode::End | KeyCode::Char('G') => state.last(),
                _ => {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(
    f: &mut Frame,
    points: &[HistoryPoint],
    meta: &ChartMeta,
    price: &[(f64, f64)],
    volume: &[(f64, f64)],
    state: &ViewState,
) {
    let area = f.area();

    // Outer vertical split: header | body | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, meta, chunks[0]);
    render_body(f, points, price, volume, state, chunks[1]);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, meta: &ChartMeta, area: Rect) {
    let header_line = Line::from(vec![
        Span::styled(
            format!(" {}  ", meta.title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│  "),
        Span::styled(meta.subtitle(), Style::default().fg(Color::White)),
    ]);
    let paragraph = Paragraph::new(header_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn render_body(
    f: &mut Frame,
    points: &[HistoryPoint],
    price: &[(f64, f64)],
    volume: &[(f64, f64)],
    state: &ViewState,
    area: Rect,
) {
    // Horizontal split: charts (75%) | selected bucket (25%)
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(area);

    // Price above volume, sharing the time axis.
    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(halves[0]);

    let x_bounds = bounds(price.iter().map(|(x, _)| *x), false);
    let cursor = state.selected();
    let price_cursor: Vec<(f64, f64)> = price.get(cursor).copied().into_iter().collect();
    let volume_cursor: Vec<(f64, f64)> = volume.get(cursor).copied().into_iter().collect();

    let price_bounds = bounds(price.iter().map(|(_, y)| *y), false);
    let price_chart = Chart::new(vec![
        Dataset::default()
            .name("Price history")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(price),
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&price_cursor),
    ])
    .block(titled_block(" MIN BUYOUT "))
    .x_axis(
        Axis::default()
            .style(Style::default().fg(Color::DarkGray))
            .bounds(x_bounds)
            .labels(time_labels(points)),
    )
    .y_axis(
        Axis::default()
            .style(Style::default().fg(Color::DarkGray))
            .bounds(price_bounds)
            .labels(price_labels(price_bounds)),
    );
    f.render_widget(price_chart, charts[0]);

    let volume_bounds = bounds(volume.iter().map(|(_, y)| *y), true);
    let volume_chart = Chart::new(vec![
        Dataset::default()
            .name("Volume")
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(Color::LightRed))
            .data(volume),
        Dataset::default()
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(Color::Yellow))
            .data(&volume_cursor),
    ])
    .block(titled_block(" VOLUME "))
    .x_axis(Axis::default().bounds(x_bounds))
    .y_axis(
        Axis::default()
            .style(Style::default().fg(Color::DarkGray))
            .bounds(volume_bounds)
            .labels(vec![
                format!("{:.0}", volume_bounds[0]),
                format!("{:.0}", volume_bounds[1]),
            ]),
    );
    f.render_widget(volume_chart, charts[1]);

    render_selection(f, points.get(cursor), halves[1]);
}

fn render_selection(f: &mut Frame, point: Option<&HistoryPoint>, area: Rect) {
    let lines: Vec<Line> = match point {
        Some(p) => hover_lines(p)
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == 0 {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(text.to_string(), style))
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "—",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(titled_block(" BUCKET "));
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[← → / h l] ", Style::default().fg(Color::Yellow)),
        Span::raw("move  "),
        Span::styled("[Home End / g G] ", Style::default().fg(Color::Yellow)),
        Span::raw("first/last"),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    fn failing_setup(restored: &Cell<u32>) -> io::Result<()> {
        let _restore = RestoreGuard::new(|| restored.set(restored.get() + 1));
        Err::<(), _>(io::Error::new(io::ErrorKind::BrokenPipe, "alternate screen"))?;
        Ok(())
    }

    #[test]
    fn restores_when_setup_fails() {
        let restored = Cell::new(0);
        assert!(failing_setup(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn restores_when_drawing_panics() {
        let restored = Cell::new(0);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _restore = RestoreGuard::new(|| restored.set(restored.get() + 1));
            panic!("draw failed");
        }));
        assert!(outcome.is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn restores_once_on_normal_exit() {
        let restored = Cell::new(0);
        {
            let _restore = RestoreGuard::new(|| restored.set(restored.get() + 1));
        }
        assert_eq!(restored.get(), 1);
    }
}
