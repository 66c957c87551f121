//! GeoClicker rendering: score, upgrades, boosts, and the scenario log.

use geo_clicker::catalog::UPGRADES;
use geo_clicker::purchase::cost_for;
use geo_clicker::save::SaveStore;
use geo_clicker::{Session, Timestamp};
use rand::Rng;
use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

const SUFFIXES: &[&str] = &["", "k", "M", "B", "T"];

/// Two decimals, with a k/M/B/T suffix from 1000 up.
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    let mut v = n;
    let mut i = 0;
    while v >= 1000.0 && i < SUFFIXES.len() - 1 {
        v /= 1000.0;
        i += 1;
    }
    format!("{}{}", (v * 100.0).round() / 100.0, SUFFIXES[i])
}

const MS_PER_DAY: i64 = 86_400_000;

/// `HH:MM:SS` of `at`, shifted by `offset_ms` from UTC.
pub fn format_clock(at: Timestamp, offset_ms: i64) -> String {
    let secs = (at as i64 + offset_ms).rem_euclid(MS_PER_DAY) / 1000;
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

/// Browser local time offset from UTC.
fn local_offset_ms() -> i64 {
    -(js_sys::Date::new_0().get_timezone_offset() as i64) * 60_000
}

pub fn render<S: SaveStore, R: Rng>(session: &Session<S, R>, f: &mut Frame, now: Timestamp) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    render_score(session, f, chunks[0], now);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(content[1]);

    render_upgrades(session, f, content[0]);
    render_boosts(session, f, right[0], now);
    render_log(session, f, right[1]);
    render_help(f, chunks[2]);
}

fn render_score<S: SaveStore, R: Rng>(session: &Session<S, R>, f: &mut Frame, area: Rect, now: Timestamp) {
    let state = &session.state;
    let featured = match session.featured_boost() {
        Some(b) => format!(
            "{} — {}s left",
            b.title,
            b.remaining_secs(now).unwrap_or(0)
        ),
        None => "No active scenario".to_string(),
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("● {} shapes", format_number(state.score)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("+{} / click", format_number(state.per_action_gain)),
                Style::default().fg(Color::White),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{} / sec", format_number(state.per_time_gain)),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(Span::styled(featured, Style::default().fg(Color::Cyan))),
    ];
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" GeoClicker "),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn render_upgrades<S: SaveStore, R: Rng>(session: &Session<S, R>, f: &mut Frame, area: Rect) {
    let state = &session.state;
    let growth = session.config().growth_factor;
    let items: Vec<ListItem> = UPGRADES
        .iter()
        .enumerate()
        .map(|(i, def)| {
            let owned = state.owned(def.id);
            let cost = cost_for(def, owned, growth);
            let affordable = state.score >= cost;
            let mut bonus = String::new();
            if def.per_time_bonus > 0.0 {
                bonus.push_str(&format!(" • +{}/s", def.per_time_bonus));
            }
            if def.per_action_bonus > 0.0 {
                bonus.push_str(&format!(" • +{}/click", def.per_action_bonus));
            }
            let cost_style = if affordable {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!(" [{}] ", i + 1),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{} x{}", def.title, owned),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {} shapes", format_number(cost)), cost_style),
                ]),
                Line::from(Span::styled(
                    format!("     {}{}", def.description, bonus),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let widget = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Upgrades "),
    );
    f.render_widget(widget, area);
}

fn render_boosts<S: SaveStore, R: Rng>(session: &Session<S, R>, f: &mut Frame, area: Rect, now: Timestamp) {
    let boosts = &session.state.active_boosts;
    let lines: Vec<Line> = if boosts.is_empty() {
        vec![Line::from(Span::styled(
            "No active boosts",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        boosts
            .iter()
            .rev()
            .map(|b| {
                let mut muls = Vec::new();
                if b.per_action_multiplier != 1.0 {
                    muls.push(format!("×{} click", b.per_action_multiplier));
                }
                if b.per_time_multiplier != 1.0 {
                    muls.push(format!("×{} sec", b.per_time_multiplier));
                }
                let remaining = b
                    .remaining_secs(now)
                    .map(|s| format!("  {s}s"))
                    .unwrap_or_default();
                Line::from(vec![
                    Span::styled(
                        b.title.clone(),
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" {}", muls.join(" "))),
                    Span::styled(remaining, Style::default().fg(Color::Gray)),
                ])
            })
            .collect()
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Boosts "),
    );
    f.render_widget(widget, area);
}

fn render_log<S: SaveStore, R: Rng>(session: &Session<S, R>, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let offset = local_offset_ms();
    let lines: Vec<Line> = session
        .log()
        .iter()
        .take(visible)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", format_clock(entry.at, offset)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.text.as_str(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Scenarios "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "[Space] click  [1-4] buy  [N] scenario  [S] save  [R] reset",
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_format_number_no_panic(n in -1e15f64..1e15) {
            let _ = format_number(n);
        }

        #[test]
        fn prop_format_number_nonneg_no_leading_minus(n in 0.0f64..1e15) {
            let s = format_number(n);
            prop_assert!(!s.starts_with('-'), "got: {}", s);
        }

        #[test]
        fn prop_format_number_small_values_have_no_suffix(n in 0.0f64..999.0) {
            let s = format_number(n);
            prop_assert!(s.chars().all(|c| c.is_ascii_digit() || c == '.'), "got: {}", s);
        }
    }
}
