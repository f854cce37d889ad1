use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, CellEdit, InputMode, PendingAction, Screen};
use super::util::expand_home;
use crate::ledger::{Ledger, TableKind};
use crate::models::ExpenseCategory;
use crate::sheet::Cell;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit EventBudget", cmd_quit, r);
    register_command!("quit", "Quit EventBudget", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("m", "Go to Members", cmd_members, r);
    register_command!("members", "Go to Members", cmd_members, r);
    register_command!("t", "Go to Tickets", cmd_tickets, r);
    register_command!("tickets", "Go to Tickets", cmd_tickets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "expense",
        "Add expense (e.g. :expense venue 1500 paid=500 Hall rental)",
        cmd_expense,
        r
    );
    register_command!(
        "ae",
        "Add expense (e.g. :ae dj 800 DJ Pacato)",
        cmd_expense,
        r
    );
    register_command!(
        "sale",
        "Record ticket sale (e.g. :sale 100 20 Batch 1)",
        cmd_sale,
        r
    );
    register_command!(
        "as",
        "Record ticket sale (e.g. :as 100 20 Batch 1)",
        cmd_sale,
        r
    );
    register_command!(
        "member-count",
        "Set number of members (e.g. :member-count 10)",
        cmd_member_count,
        r
    );
    register_command!(
        "mc",
        "Set number of members (e.g. :mc 10)",
        cmd_member_count,
        r
    );
    register_command!(
        "edit",
        "Edit focused cell (e.g. :edit 250)",
        cmd_edit,
        r
    );
    register_command!(
        "delete-row",
        "Delete selected row",
        cmd_delete_row,
        r
    );
    register_command!(
        "export",
        "Export workbook (e.g. :export ~/party.xlsx)",
        cmd_export,
        r
    );
    register_command!(
        "export-csv",
        "Export one CSV per table (e.g. :export-csv ~/party)",
        cmd_export_csv,
        r
    );
    register_command!(
        "load",
        "Replace all tables from a workbook (e.g. :load ~/party.xlsx)",
        cmd_load,
        r
    );
    register_command!(
        "load-csv",
        "Replace one table from CSV (e.g. :load-csv expenses ~/e.csv)",
        cmd_load_csv,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Table editing ────────────────────────────────────────────

/// Open the focused cell of the current table in the command bar.
pub(crate) fn start_edit(app: &mut App, ledger: &Ledger) {
    let Some(table) = app.screen.table() else {
        return;
    };
    let cursor = *app.cursor(table);
    let sheet = ledger.sheet(table);
    let Some(row) = sheet.rows.get(cursor.row) else {
        app.set_status(format!("{table} is empty"));
        return;
    };
    let col = cursor.col.min(sheet.headers.len().saturating_sub(1));
    let Some(column) = sheet.headers.get(col) else {
        return;
    };
    if table.derived_columns().contains(&column.as_str()) {
        app.set_status(format!("{column} is computed and cannot be edited"));
        return;
    }

    app.command_input = row.get(col).map(Cell::to_string).unwrap_or_default();
    app.editing = Some(CellEdit {
        table,
        row: cursor.row,
        col,
    });
    app.input_mode = InputMode::Editing;
    app.set_status(format!("Editing {column}, Enter to save, Esc to cancel"));
}

/// Write `value` into a cell and hand the whole grid back to the ledger.
pub(crate) fn commit_edit(app: &mut App, ledger: &mut Ledger, edit: CellEdit, value: &str) {
    let mut sheet = ledger.sheet(edit.table);
    let column = sheet.headers.get(edit.col).cloned().unwrap_or_default();
    if edit.table.derived_columns().contains(&column.as_str()) {
        app.set_status(format!("{column} is computed and cannot be edited"));
        return;
    }
    if !sheet.set_cell(edit.row, edit.col, Cell::text(value.trim())) {
        app.set_status("Row no longer exists");
        return;
    }
    match ledger.replace_sheet(edit.table, &sheet) {
        Ok(()) => app.set_status(format!("{column} updated")),
        Err(e) => app.set_status(format!("Edit rejected: {e}")),
    }
}

pub(crate) fn delete_row(app: &mut App, ledger: &mut Ledger, table: TableKind, row: usize) {
    let mut sheet = ledger.sheet(table);
    if row >= sheet.rows.len() {
        app.set_status("Row no longer exists");
        return;
    }
    sheet.rows.remove(row);
    match ledger.replace_sheet(table, &sheet) {
        Ok(()) => {
            let rows = ledger.row_count(table);
            app.clamp_cursor(table, rows);
            app.set_status(format!("Deleted row {} from {table}", row + 1));
        }
        Err(e) => app.set_status(format!("Delete rejected: {e}")),
    }
}

/// Run the action the user just confirmed.
pub(crate) fn apply_pending(app: &mut App, ledger: &mut Ledger, action: PendingAction) {
    match action {
        PendingAction::DeleteRow { table, row, label } => {
            tracing::debug!(%table, row, %label, "row deletion confirmed");
            delete_row(app, ledger, table, row);
        }
        PendingAction::LoadWorkbook { path } => {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    app.set_status(format!("Cannot read {}: {e}", path.display()));
                    return;
                }
            };
            match ledger.import_workbook(&bytes) {
                Ok(()) => {
                    for table in TableKind::all() {
                        let rows = ledger.row_count(*table);
                        app.clamp_cursor(*table, rows);
                    }
                    app.set_status(format!(
                        "Loaded {} ({} expenses, {} members, {} sales)",
                        path.display(),
                        ledger.expenses().len(),
                        ledger.member_count(),
                        ledger.revenue().len()
                    ));
                }
                Err(e) => app.set_status(format!("Load rejected: {e}")),
            }
        }
    }
}

fn show_table(app: &mut App, ledger: &Ledger, screen: Screen) {
    app.screen = screen;
    if let Some(table) = screen.table() {
        let rows = ledger.row_count(table);
        app.clamp_cursor(table, rows);
    }
}

/// Put the cursor on the last row, where new records land.
fn focus_last_row(app: &mut App, ledger: &Ledger, table: TableKind) {
    let rows = ledger.row_count(table);
    let page = app.table_page();
    let cursor = app.cursor_mut(table);
    cursor.row = rows.saturating_sub(1);
    cursor.scroll = cursor.row.saturating_sub(page - 1);
}

fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim()).ok()
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    show_table(app, ledger, Screen::Dashboard);
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    show_table(app, ledger, Screen::Expenses);
    Ok(())
}

fn cmd_members(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    show_table(app, ledger, Screen::Members);
    Ok(())
}

fn cmd_tickets(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    show_table(app, ledger, Screen::Revenue);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_expense(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.len() < 2 {
        app.set_status("Usage: :expense <category> <estimated> [paid=<amount>] <description>");
        return Ok(());
    }

    let Some(category) = ExpenseCategory::parse(tokens[0]) else {
        let names: Vec<&str> = ExpenseCategory::all().iter().map(|c| c.as_str()).collect();
        app.set_status(format!(
            "Unknown category '{}'. Categories: {}",
            tokens[0],
            names.join(", ")
        ));
        return Ok(());
    };

    let Some(estimated) = parse_amount(tokens[1]) else {
        app.set_status(format!("Invalid amount: {}", tokens[1]));
        return Ok(());
    };

    // The amount already paid needs its `paid=` marker; a bare number is
    // part of the description.
    let (paid, rest) = match tokens.get(2).and_then(|t| t.strip_prefix("paid=")) {
        Some(amount) => match parse_amount(amount) {
            Some(paid) => (paid, &tokens[3..]),
            None => {
                app.set_status(format!("Invalid paid amount: {amount}"));
                return Ok(());
            }
        },
        None => (Decimal::ZERO, &tokens[2..]),
    };
    let description = rest.join(" ");

    match ledger.add_expense(description.clone(), category, estimated, paid) {
        Ok(()) => {
            app.screen = Screen::Expenses;
            focus_last_row(app, ledger, TableKind::Expenses);
            let status = ledger
                .expenses()
                .last()
                .map(|e| e.status().as_str())
                .unwrap_or("");
            app.set_status(format!("Added expense: {description} [{category}] {status}"));
        }
        Err(e) => app.set_status(format!("Expense rejected: {e}")),
    }
    Ok(())
}

fn cmd_sale(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.len() < 2 {
        app.set_status("Usage: :sale <quantity> <unit price> <source>");
        return Ok(());
    }

    let Ok(quantity) = tokens[0].parse::<i64>() else {
        app.set_status(format!("Invalid quantity: {}", tokens[0]));
        return Ok(());
    };
    let Some(unit_price) = parse_amount(tokens[1]) else {
        app.set_status(format!("Invalid price: {}", tokens[1]));
        return Ok(());
    };
    let source = tokens[2..].join(" ");

    match ledger.add_revenue(source.clone(), quantity, unit_price) {
        Ok(()) => {
            app.screen = Screen::Revenue;
            focus_last_row(app, ledger, TableKind::Revenue);
            app.set_status(format!("Recorded sale: {source} x{quantity}"));
        }
        Err(e) => app.set_status(format!("Sale rejected: {e}")),
    }
    Ok(())
}

fn cmd_member_count(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let Ok(count) = args.parse::<usize>() else {
        app.set_status(format!(
            "Usage: :member-count <n>. Currently {} members",
            ledger.member_count()
        ));
        return Ok(());
    };

    match ledger.resize_members(count) {
        Ok(()) => {
            app.clamp_cursor(TableKind::Members, count);
            app.set_status(format!("Now {count} members"));
        }
        Err(e) => app.set_status(format!("Resize rejected: {e}")),
    }
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let Some(table) = app.screen.table() else {
        app.set_status("Switch to a table first");
        return Ok(());
    };
    if args.is_empty() {
        start_edit(app, ledger);
        return Ok(());
    }

    let cursor = *app.cursor(table);
    if cursor.row >= ledger.row_count(table) {
        app.set_status(format!("{table} is empty"));
        return Ok(());
    }
    let edit = CellEdit {
        table,
        row: cursor.row,
        col: cursor.col,
    };
    commit_edit(app, ledger, edit, args);
    Ok(())
}

fn cmd_delete_row(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let Some(table) = app.screen.table() else {
        app.set_status("Switch to a table first");
        return Ok(());
    };
    if !ledger.allows_row_insert_delete(table) {
        app.set_status(format!(
            "{table} has a fixed number of rows. Use :member-count to change it"
        ));
        return Ok(());
    }

    let row = app.cursor(table).row;
    let sheet = ledger.sheet(table);
    if let Some(cells) = sheet.rows.get(row) {
        let label = cells.first().map(Cell::to_string).unwrap_or_default();
        app.confirm(
            format!("Delete '{label}'?"),
            PendingAction::DeleteRow { table, row, label },
        );
    } else {
        app.set_status(format!("{table} is empty"));
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        app.config.default_export_path()
    } else {
        expand_home(args)
    };

    let bytes = match ledger.export_workbook() {
        Ok(bytes) => bytes,
        Err(e) => {
            app.set_status(format!("Export failed: {e}"));
            return Ok(());
        }
    };
    match std::fs::write(&path, bytes) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "workbook written");
            let at = chrono::Local::now().format("%H:%M");
            app.set_status(format!("Exported workbook to {} at {at}", path.display()));
        }
        Err(e) => app.set_status(format!("Export failed: {}: {e}", path.display())),
    }
    Ok(())
}

fn cmd_export_csv(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let dir = if args.is_empty() {
        app.config
            .default_export_path()
            .with_extension("")
    } else {
        expand_home(args)
    };

    match ledger.export_csv(&dir) {
        Ok(files) => app.set_status(format!(
            "Exported {} CSV files to {}",
            files.len(),
            dir.display()
        )),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}

fn cmd_load(args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :load <workbook.xlsx>");
        return Ok(());
    }
    let path = expand_home(args);
    if !path.exists() {
        app.set_status(format!("File not found: {}", path.display()));
        return Ok(());
    }
    app.confirm(
        format!("Replace all tables with {}?", path.display()),
        PendingAction::LoadWorkbook { path },
    );
    Ok(())
}

fn cmd_load_csv(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let mut parts = args.splitn(2, ' ');
    let table = parts.next().and_then(TableKind::parse);
    let path = parts.next().map(str::trim).filter(|p| !p.is_empty());
    let (Some(table), Some(path)) = (table, path) else {
        app.set_status("Usage: :load-csv <expenses|members|revenue> <file.csv>");
        return Ok(());
    };

    let path = expand_home(path);
    match ledger.load_csv(table, &path) {
        Ok(rows) => {
            app.clamp_cursor(table, rows);
            app.set_status(format!("Loaded {rows} rows into {table}"));
        }
        Err(e) => app.set_status(format!("Load rejected: {e}")),
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
