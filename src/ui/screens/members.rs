use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ledger::{Ledger, TableKind};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_money, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    super::grid::render(
        f,
        columns[0],
        &ledger.sheet(TableKind::Members),
        app.cursor(TableKind::Members),
        &app.config.currency,
        "Use :member-count <n> to set the number of members",
    );
    render_standings(f, right[0], app, ledger);
    render_contribution_chart(f, right[1], app, ledger);
}

fn render_standings(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let currency = app.config.currency.as_str();
    let summary = ledger.compute_summary(ledger.member_count());

    let items: Vec<ListItem> = ledger
        .member_standings(ledger.member_count())
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|standing| {
            let style = if standing.is_settled() {
                theme::positive_style()
            } else {
                theme::negative_style()
            };
            let owed = if standing.is_settled() {
                String::new()
            } else {
                format!(" owes {}", format_money(standing.outstanding, currency))
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<18}", truncate(&standing.name, 17)),
                    theme::normal_style(),
                ),
                Span::styled(
                    format!("{:>14} ", format_money(standing.paid, currency)),
                    theme::dim_style(),
                ),
                Span::styled(
                    format!("{:<8}", standing.label()),
                    style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(owed, style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Quota {} per member ",
                    format_money(summary.quota_per_member, currency)
                ),
                theme::title_style(),
            )),
    );
    f.render_widget(list, area);
}

fn render_contribution_chart(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Contributions ", theme::title_style()));

    let total: Decimal = ledger.members().iter().map(|m| m.paid).sum();
    if total <= Decimal::ZERO {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No contributions yet",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = ledger
        .members()
        .iter()
        .map(|m| {
            Bar::default()
                .value(m.paid.max(Decimal::ZERO).to_u64().unwrap_or(0))
                .text_value(format_money(m.paid, ""))
                .label(Line::from(truncate(&m.name, 8)))
                .style(Style::default().fg(theme::GREEN))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::GREEN))
        .value_style(Style::default().fg(theme::HEADER_BG).bg(theme::GREEN));

    f.render_widget(chart, area);
}
