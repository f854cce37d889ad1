use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::screens::{dashboard, grid, members};
use super::theme;
use super::util::format_money;
use crate::ledger::{Ledger, TableKind};

pub(crate) fn render(f: &mut Frame, app: &App, ledger: &Ledger) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app, ledger);
    render_status_bar(f, chunks[2], app, ledger);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let screens = Screen::all();
    let titles = screens
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}:{s}", i + 1));
    let selected = screens.iter().position(|s| *s == app.screen).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::dim_style().bg(theme::HEADER_BG))
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let currency = app.config.currency.as_str();
    match app.screen {
        Screen::Dashboard => dashboard::render(f, area, app, ledger),
        Screen::Expenses => grid::render(
            f,
            area,
            &ledger.sheet(TableKind::Expenses),
            app.cursor(TableKind::Expenses),
            currency,
            "Add one with :expense <category> <estimated> [paid=<amount>] <description>",
        ),
        Screen::Members => members::render(f, area, app, ledger),
        Screen::Revenue => grid::render(
            f,
            area,
            &ledger.sheet(TableKind::Revenue),
            app.cursor(TableKind::Revenue),
            currency,
            "Record one with :sale <quantity> <unit price> <source>",
        ),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let summary = ledger.compute_summary(ledger.member_count());
    let info = format!(
        " {} | {} members | quota {}",
        app.screen,
        summary.member_count,
        format_money(summary.quota_per_member, &app.config.currency)
    );

    let right = match app.screen {
        Screen::Dashboard => " 1-4 tabs | :expense | :sale | ? help ",
        Screen::Expenses | Screen::Revenue => " h/l column | e edit | D delete | ? help ",
        Screen::Members => " h/l column | e edit | :mc resize | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Editing => (
            Line::from(vec![
                Span::styled("edit> ", Style::default().fg(theme::GREEN)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(6 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, e to edit a cell, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

const KEY_HELP: &[(&str, &str)] = &[
    ("j/k, Up/Down", "Move row"),
    ("h/l, Left/Right", "Move column"),
    ("1-4, Tab/S-Tab", "Switch tabs"),
    ("g/G", "First/last row"),
    ("Ctrl-d/u", "Half page down/up"),
    ("e, Enter", "Edit focused cell (Esc cancels)"),
    ("D", "Delete row"),
    (":", "Command mode"),
    ("Ctrl-q", "Quit"),
];

fn heading(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(" EventBudget Help ", theme::title_style())),
        Line::from(""),
        heading(" Keys"),
    ];
    lines.extend(KEY_HELP.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(format!("  {keys:<18}"), Style::default().fg(theme::ACCENT)),
            Span::styled(*action, theme::normal_style()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(heading(" Commands"));

    // Long names only; each description once.
    let mut seen = std::collections::HashSet::new();
    let mut registry: Vec<(&str, &str)> = commands::COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 2)
        .filter(|(_, cmd)| seen.insert(cmd.description))
        .map(|(name, cmd)| (*name, cmd.description))
        .collect();
    registry.sort_unstable();
    lines.extend(registry.into_iter().map(|(name, desc)| {
        Line::from(vec![
            Span::styled(format!("  :{name:<14} "), Style::default().fg(theme::ACCENT)),
            Span::styled(desc, theme::normal_style()),
        ])
    }));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 84.min(area.width.saturating_sub(4));
    let popup = centered(area, width, height);

    f.render_widget(Clear, popup);
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}
