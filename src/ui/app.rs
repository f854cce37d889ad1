use std::path::PathBuf;

use crate::config::Config;
use crate::ledger::TableKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Members,
    Revenue,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses, Self::Members, Self::Revenue]
    }

    /// The editable table shown on this screen, if any.
    pub(crate) fn table(&self) -> Option<TableKind> {
        match self {
            Self::Dashboard => None,
            Self::Expenses => Some(TableKind::Expenses),
            Self::Members => Some(TableKind::Members),
            Self::Revenue => Some(TableKind::Revenue),
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Members => write!(f, "Members"),
            Self::Revenue => write!(f, "Tickets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteRow {
        table: TableKind,
        row: usize,
        label: String,
    },
    LoadWorkbook {
        path: PathBuf,
    },
}

/// Cursor position inside one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TableCursor {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) scroll: usize,
}

/// The cell being edited in `InputMode::Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellEdit {
    pub(crate) table: TableKind,
    pub(crate) row: usize,
    pub(crate) col: usize,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) config: Config,

    // One cursor per table, indexed like TableKind::all()
    pub(crate) cursors: [TableCursor; 3],
    pub(crate) editing: Option<CellEdit>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            config,

            cursors: [TableCursor::default(); 3],
            editing: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn cursor(&self, table: TableKind) -> &TableCursor {
        &self.cursors[cursor_slot(table)]
    }

    pub(crate) fn cursor_mut(&mut self, table: TableKind) -> &mut TableCursor {
        &mut self.cursors[cursor_slot(table)]
    }

    /// Pull a cursor back inside a table that may have shrunk.
    pub(crate) fn clamp_cursor(&mut self, table: TableKind, rows: usize) {
        let cursor = self.cursor_mut(table);
        if cursor.row >= rows {
            cursor.row = rows.saturating_sub(1);
        }
        if cursor.scroll > cursor.row {
            cursor.scroll = cursor.row;
        }
    }

    /// Rows a table shows between its borders and header.
    pub(crate) fn table_page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn confirm(&mut self, message: impl Into<String>, action: PendingAction) {
        self.confirm_message = message.into();
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn cursor_slot(table: TableKind) -> usize {
    match table {
        TableKind::Expenses => 0,
        TableKind::Members => 1,
        TableKind::Revenue => 2,
    }
}
