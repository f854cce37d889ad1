//! The editable table surface: renders any ledger sheet with a row cursor
//! and a focused cell.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell as GridCell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::sheet::{Cell, Sheet};
use crate::ui::app::TableCursor;
use crate::ui::theme;
use crate::ui::util::{format_money, truncate};

pub(crate) fn render(
    f: &mut Frame,
    area: Rect,
    sheet: &Sheet,
    cursor: &TableCursor,
    currency: &str,
    empty_hint: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {} ({}) ", sheet.name, sheet.rows.len()),
            theme::title_style(),
        ));

    if sheet.rows.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No rows in {}", sheet.name),
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(empty_hint.to_string(), theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header = Row::new(
        sheet
            .headers
            .iter()
            .map(|h| GridCell::from(h.as_str()).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = sheet
        .rows
        .iter()
        .enumerate()
        .skip(cursor.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, cells)| {
            let is_cursor = i == cursor.row;
            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let grid_cells: Vec<GridCell> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let text = display(cell, currency);
                    if is_cursor && col == cursor.col {
                        GridCell::from(text).style(theme::focused_cell_style())
                    } else if let Some(style) = status_style(cell) {
                        GridCell::from(Span::styled(text, style))
                    } else {
                        GridCell::from(text)
                    }
                })
                .collect();
            Row::new(grid_cells).style(style)
        })
        .collect();

    let widths: Vec<Constraint> = sheet
        .headers
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i == 0 {
                Constraint::Min(20)
            } else {
                Constraint::Length(16)
            }
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn display(cell: &Cell, currency: &str) -> String {
    match cell {
        Cell::Number(d) => format_money(*d, currency),
        Cell::Text(s) => truncate(s, 40),
        other => other.to_string(),
    }
}

/// Colour for the derived status words and negative amounts.
fn status_style(cell: &Cell) -> Option<Style> {
    match cell {
        Cell::Text(s) if s == "Paid" || s == "Settled" => Some(theme::positive_style()),
        Cell::Text(s) if s == "Pending" || s == "Owing" => Some(theme::negative_style()),
        Cell::Text(s) if s == "Partial" => Some(Style::default().fg(theme::YELLOW)),
        Cell::Number(d) if *d < Decimal::ZERO => Some(theme::negative_style()),
        _ => None,
    }
}
