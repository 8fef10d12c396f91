//! Ratatui-based terminal UI.
//!
//! The TUI is an input form for the six scenario values with a live result
//! panel and a projection chart. Every edit re-runs the pipeline, which is
//! cheap enough to do on each key press.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::config::Settings;
use crate::domain::{InputAxis, PathPoint, Prediction, RawInputs};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::ProjectionChart;

/// Start the TUI with the given starting inputs.
pub fn run(inputs: RawInputs, settings: &Settings) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(inputs, settings.currency.clone());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// One row of the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Input(InputAxis),
    Horizon,
}

const FIELDS: [Field; 6] = [
    Field::Input(InputAxis::Current),
    Field::Input(InputAxis::Growth),
    Field::Input(InputAxis::Volatility),
    Field::Input(InputAxis::Economic),
    Field::Input(InputAxis::Industry),
    Field::Horizon,
];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Input(InputAxis::Current) => "Current value",
            Field::Input(InputAxis::Growth) => "Growth (%)",
            Field::Input(InputAxis::Volatility) => "Volatility (%)",
            Field::Input(InputAxis::Economic) => "Economic index",
            Field::Input(InputAxis::Industry) => "Industry trend",
            Field::Horizon => "Horizon (periods)",
        }
    }

    /// Increment applied by ←/→.
    fn step(self) -> f64 {
        match self {
            Field::Input(InputAxis::Current) => 100.0,
            Field::Input(InputAxis::Growth) | Field::Input(InputAxis::Volatility) => 1.0,
            Field::Input(InputAxis::Economic) | Field::Input(InputAxis::Industry) => 0.5,
            Field::Horizon => 1.0,
        }
    }

    fn display(self, inputs: &RawInputs) -> String {
        match self {
            Field::Input(axis) => format!("{:.2}", inputs.get(axis)),
            Field::Horizon => inputs.horizon_periods.to_string(),
        }
    }

    fn adjust(self, inputs: RawInputs, direction: f64) -> RawInputs {
        match self {
            Field::Input(axis) => inputs.with(axis, inputs.get(axis) + direction * self.step()),
            Field::Horizon => {
                let horizon = if direction >= 0.0 {
                    inputs.horizon_periods.saturating_add(1)
                } else {
                    inputs.horizon_periods.saturating_sub(1)
                };
                RawInputs {
                    horizon_periods: horizon,
                    ..inputs
                }
            }
        }
    }

    fn parse(self, inputs: RawInputs, text: &str) -> Result<RawInputs, String> {
        let text = text.trim();
        match self {
            Field::Input(axis) => text
                .parse::<f64>()
                .map(|v| inputs.with(axis, v))
                .map_err(|e| format!("Invalid number '{text}': {e}")),
            Field::Horizon => text
                .parse::<u32>()
                .map(|h| RawInputs {
                    horizon_periods: h,
                    ..inputs
                })
                .map_err(|e| format!("Invalid horizon '{text}': {e}")),
        }
    }
}

struct App {
    inputs: RawInputs,
    currency: String,
    selected_field: usize,
    /// Text buffer while a field is being typed into.
    editing: Option<String>,
    status: String,
    prediction: Prediction,
    path: Vec<PathPoint>,
}

impl App {
    fn new(inputs: RawInputs, currency: String) -> Self {
        let prediction = crate::app::pipeline::predict(&inputs);
        Self {
            status: status_for(&inputs),
            path: crate::app::pipeline::path_for(&prediction),
            inputs,
            currency,
            selected_field: 0,
            editing: None,
            prediction,
        }
    }

    fn field(&self) -> Field {
        FIELDS[self.selected_field]
    }

    fn recompute(&mut self) {
        self.prediction = crate::app::pipeline::predict(&self.inputs);
        self.path = crate::app::pipeline::path_for(&self.prediction);
        self.status = status_for(&self.inputs);
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELDS.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust(-1.0),
            KeyCode::Right => self.adjust(1.0),
            KeyCode::Enter => {
                self.editing = Some(String::new());
                self.status = format!("Editing {}. Enter to apply, Esc to cancel.", self.field().label());
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '.' => {
                // Typing straight into a field starts an edit.
                self.editing = Some(c.to_string());
            }
            _ => {}
        }
        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let text = std::mem::take(buffer);
                self.editing = None;
                match self.field().parse(self.inputs, &text) {
                    Ok(inputs) => {
                        self.inputs = inputs;
                        self.recompute();
                    }
                    Err(msg) => self.status = msg,
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '.' => buffer.push(c),
            _ => {}
        }
    }

    fn adjust(&mut self, direction: f64) {
        self.inputs = self.field().adjust(self.inputs, direction);
        self.recompute();
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rule = &self.prediction.fuzzy.rule;
        let line = Line::from(vec![
            Span::styled("msent", Style::default().fg(Color::Cyan)),
            Span::raw(" - market sentiment predictor | "),
            Span::styled(
                format!(
                    "rule: growth {} / volatility {} / economic {}",
                    rule.growth.label(),
                    rule.volatility.label(),
                    rule.economic.label()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(0)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0)])
            .split(columns[0]);

        self.draw_form(frame, left[0]);
        self.draw_results(frame, left[1]);
        self.draw_chart(frame, columns[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = FIELDS
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let value = match (&self.editing, i == self.selected_field) {
                    (Some(buffer), true) => format!("{buffer}_"),
                    _ => field.display(&self.inputs),
                };
                ListItem::new(format!("{:<18} {value}", field.label()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Inputs").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let report = crate::report::format_prediction(&self.prediction.result(), &self.currency);
        let fuzzy = self.prediction.fuzzy_result();

        let mut lines: Vec<Line> = report
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().add_modifier(Modifier::BOLD))))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("score={:.4} crisp={:.4}", self.prediction.neural.score, fuzzy.crisp),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!("certainty={:.1}%", fuzzy.certainty * 100.0),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().title("Prediction").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Projection").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(series) = chart_series(&self.path) else {
            let msg = Paragraph::new("No finite projection to plot.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        let widget = ProjectionChart {
            value: &series.value,
            low: &series.low,
            high: &series.high,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "period",
            y_label: format!("value ({})", self.currency),
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, series.x_bounds, series.y_bounds);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter/digits type value  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

struct ChartSeries {
    value: Vec<(f64, f64)>,
    low: Vec<(f64, f64)>,
    high: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series for Plotters; `None` when nothing finite is left to draw.
fn chart_series(path: &[PathPoint]) -> Option<ChartSeries> {
    let finite: Vec<&PathPoint> = path
        .iter()
        .filter(|p| p.value.is_finite() && p.low.is_finite() && p.high.is_finite())
        .collect();
    if finite.is_empty() {
        return None;
    }

    let value: Vec<(f64, f64)> = finite.iter().map(|p| (f64::from(p.period), p.value)).collect();
    let low: Vec<(f64, f64)> = finite.iter().map(|p| (f64::from(p.period), p.low)).collect();
    let high: Vec<(f64, f64)> = finite.iter().map(|p| (f64::from(p.period), p.high)).collect();

    let x0 = value.first().map(|p| p.0).unwrap_or(0.0);
    let mut x1 = value.last().map(|p| p.0).unwrap_or(1.0);
    if x1 <= x0 {
        x1 = x0 + 1.0;
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in low.iter().chain(high.iter()).chain(value.iter()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if y_max <= y_min {
        let pad = (y_min.abs() * 0.01).max(1.0);
        y_min -= pad;
        y_max += pad;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    Some(ChartSeries {
        value,
        low,
        high,
        x_bounds: [x0, x1],
        y_bounds: [y_min - pad, y_max + pad],
    })
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 9,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.1}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.0}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("period")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }
}

fn status_for(inputs: &RawInputs) -> String {
    match inputs.validate() {
        Ok(()) => "Ready.".to_string(),
        Err(e) => format!("Warning: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(
            RawInputs {
                current_value: 1000.0,
                growth_percent: 20.0,
                volatility_percent: 10.0,
                economic_index: 3.0,
                industry_trend_index: 1.0,
                horizon_periods: 5,
            },
            "₹".to_string(),
        )
    }

    #[test]
    fn arrow_keys_step_the_selected_field() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.inputs.growth_percent, 21.0);
        assert_eq!(app.prediction.inputs.growth_percent, 21.0);

        for _ in 0..10 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.field(), Field::Horizon);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.inputs.horizon_periods, 4);
        assert_eq!(app.path.len(), 5);
    }

    #[test]
    fn typed_value_replaces_field_on_enter() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        for c in "35.5".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert!(app.editing.is_none());
        assert_eq!(app.inputs.volatility_percent, 35.5);
        assert_eq!(app.status, "Ready.");
    }

    #[test]
    fn bad_entry_keeps_previous_value() {
        let mut app = app();
        app.handle_key(KeyCode::Char('-'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.inputs.current_value, 1000.0);
        assert!(app.status.starts_with("Invalid number"));
    }

    #[test]
    fn invalid_inputs_still_render_with_a_warning() {
        let mut app = app();
        app.handle_key(KeyCode::Char('0'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.inputs.current_value, 0.0);
        assert!(app.status.starts_with("Warning:"));
        assert!(!app.handle_key(KeyCode::Left));
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn new_app_reports_input_state_up_front() {
        let app = app();
        assert_eq!(app.status, "Ready.");
        assert_eq!(app.path.len(), 6);
        assert_eq!(app.prediction.inputs, app.inputs);

        let app = App::new(
            RawInputs {
                current_value: -5.0,
                ..app.inputs
            },
            "$".to_string(),
        );
        assert!(app.status.starts_with("Warning:"));
        assert!(app.prediction.result().final_value < 0.0);
    }

    #[test]
    fn chart_series_skips_non_finite_paths() {
        assert!(chart_series(&[PathPoint { period: 0, value: f64::NAN, low: f64::NAN, high: f64::NAN }]).is_none());

        let app = app();
        let series = chart_series(&app.path).unwrap();
        assert_eq!(series.x_bounds, [0.0, 5.0]);
        assert!(series.y_bounds[0] < 1000.0 && series.y_bounds[1] > 1574.0);
    }
}
