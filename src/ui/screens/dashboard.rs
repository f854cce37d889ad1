use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::models::{Outcome, Summary};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_money, outcome_message, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let summary = ledger.compute_summary(ledger.member_count());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Length(4), // Outcome
            Constraint::Min(8),    // Category chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app, ledger, &summary);
    render_outcome(f, chunks[1], app, &summary);
    render_category_chart(f, chunks[2], app, ledger);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger, s: &Summary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let currency = app.config.currency.as_str();
    let sales = ledger.tickets_sold();
    let to_pay: Decimal = ledger.expenses().iter().map(|e| e.outstanding()).sum();

    render_card(
        f,
        cards[0],
        "Event Cost",
        format_money(s.total_expenses_estimated, currency),
        theme::RED,
        format!(
            "{} paid, {} to go",
            format_money(s.total_expenses_paid, currency),
            format_money(to_pay, currency)
        ),
    );
    render_card(
        f,
        cards[1],
        "Ticket Revenue",
        format_money(s.total_revenue, currency),
        theme::GREEN,
        format!("{sales} tickets"),
    );
    render_card(
        f,
        cards[2],
        "Cash on Hand",
        format_money(s.cash_on_hand, currency),
        theme::signed_color(s.cash_on_hand < Decimal::ZERO),
        if s.cash_on_hand > Decimal::ZERO {
            "Surplus".to_string()
        } else {
            "Cash short".to_string()
        },
    );
    render_card(
        f,
        cards[3],
        "Quota per Member",
        format_money(s.quota_per_member, currency),
        theme::ACCENT,
        format!("{} members", s.member_count),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: ratatui::style::Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

/// Closing report: profit split, covered by members, or what is missing.
fn render_outcome(f: &mut Frame, area: Rect, app: &App, s: &Summary) {
    let currency = app.config.currency.as_str();
    let color = match s.outcome() {
        Outcome::Profit { .. } => theme::GREEN,
        Outcome::Covered => theme::YELLOW,
        Outcome::Shortfall { .. } => theme::RED,
    };
    let message = outcome_message(s, currency);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(
                " Profit/Loss {} ",
                format_money(s.profit_or_loss, currency)
            ),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    let text = Paragraph::new(Line::from(Span::styled(message, Style::default().fg(color))))
        .centered()
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Cost by Category ", theme::title_style()));

    let breakdown = ledger.spending_by_category();
    if breakdown.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :expense <category> <amount> <description>",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = breakdown
        .iter()
        .map(|(category, amount)| {
            Bar::default()
                .value(amount.to_u64().unwrap_or(0))
                .text_value(format_money(*amount, &app.config.currency))
                .label(Line::from(truncate(category.as_str(), 14)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(14)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme::ACCENT));

    f.render_widget(chart, area);
}
