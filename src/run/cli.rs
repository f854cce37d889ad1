use anyhow::{Context, Result};

use crate::config::Config;
use crate::export::{read_sheet, XLSX_MIME};
use crate::ledger::{Ledger, TableKind};
use crate::models::Member;
use crate::ui::util::{expand_home, format_money, outcome_message};

/// Flags that consume the argument after them.
const VALUE_FLAGS: &[&str] = &[
    "--from",
    "--expenses",
    "--contributions",
    "--revenue",
    "--members",
];

pub(crate) fn as_cli(args: &[String], config: Config) -> Result<()> {
    let rest = &args[2..];
    let config = match flag(rest, "--members") {
        Some(n) => {
            let members: usize = n
                .parse()
                .with_context(|| format!("--members expects a whole number, got '{n}'"))?;
            config.with_members(members)?
        }
        None => config,
    };

    match args[1].as_str() {
        "summary" | "s" => cli_summary(rest, &config),
        "export" => cli_export(rest, &config),
        "template" => cli_template(rest, &config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("eventbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("EventBudget: split the costs of an event between a group of members");
    println!();
    println!("Usage: eventbudget [command] [sources]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print totals, quota and outcome");
    println!("  export [out.xlsx]             Write the spreadsheet report");
    println!("  template [out.xlsx]           Write an empty workbook to fill in");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Sources:");
    println!("  --from <workbook.xlsx>        Load all three tables from a workbook");
    println!("  --expenses <file.csv>         Load expenses from CSV");
    println!("  --contributions <file.csv>    Load member contributions from CSV");
    println!("  --revenue <file.csv>          Load ticket sales from CSV");
    println!("  --members <n>                 Number of members (default from config)");
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with('-') {
            return Some(arg);
        }
    }
    None
}

/// Build a ledger from the workbook and CSV sources named on the command line.
fn load_ledger(args: &[String], config: &Config) -> Result<Ledger> {
    let mut ledger = Ledger::new(config.members);

    if let Some(path) = flag(args, "--from") {
        let path = expand_home(path);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read workbook: {}", path.display()))?;
        ledger
            .import_workbook(&bytes)
            .with_context(|| format!("Invalid workbook: {}", path.display()))?;
        if flag(args, "--members").is_some() {
            ledger.resize_members(config.members)?;
        }
    }

    let sources = [
        ("--expenses", TableKind::Expenses),
        ("--contributions", TableKind::Members),
        ("--revenue", TableKind::Revenue),
    ];
    for (name, kind) in sources {
        let Some(path) = flag(args, name) else {
            continue;
        };
        let path = expand_home(path);
        if kind == TableKind::Members {
            // The member table is fixed-size, so size it to the file first.
            // Blank rows are skipped on load and must not count.
            let members: Vec<Member> = read_sheet(&path, kind.sheet_name())?
                .to_records()
                .with_context(|| format!("Invalid {kind} file: {}", path.display()))?;
            if flag(args, "--members").is_some() && members.len() != config.members {
                anyhow::bail!(
                    "--members {} does not match the {} members in {}",
                    config.members,
                    members.len(),
                    path.display()
                );
            }
            ledger
                .resize_members(members.len())
                .with_context(|| format!("Cannot use {}", path.display()))?;
        }
        let rows = ledger
            .load_csv(kind, &path)
            .with_context(|| format!("Invalid {kind} file: {}", path.display()))?;
        println!("Loaded {rows} rows into {kind} from {}", path.display());
    }

    Ok(ledger)
}

fn cli_summary(args: &[String], config: &Config) -> Result<()> {
    let ledger = load_ledger(args, config)?;
    let s = ledger.compute_summary(ledger.member_count());
    let money = |d| format_money(d, &config.currency);

    println!(
        "EventBudget summary ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    println!("{}", "─".repeat(44));
    println!("  Members:           {}", s.member_count);
    println!("  Estimated cost:    {}", money(s.total_expenses_estimated));
    println!("  Paid out:          {}", money(s.total_expenses_paid));
    println!("  Contributions:     {}", money(s.total_member_contributions));
    println!("  Ticket revenue:    {}", money(s.total_revenue));
    println!("  Cash on hand:      {}", money(s.cash_on_hand));
    println!("  Quota per member:  {}", money(s.quota_per_member));
    println!("  Profit/Loss:       {}", money(s.profit_or_loss));

    let spending = ledger.spending_by_category();
    if !spending.is_empty() {
        println!();
        println!("Cost by Category:");
        for (category, amount) in &spending {
            println!("  {:<24} {}", category.as_str(), money(*amount));
        }
    }

    let owing: Vec<_> = ledger
        .member_standings(s.member_count)
        .into_iter()
        .filter(|m| !m.is_settled())
        .collect();
    if !owing.is_empty() {
        println!();
        println!("Still owing:");
        for m in &owing {
            println!("  {:<24} {}", m.name, money(m.outstanding));
        }
    }

    println!();
    println!("{}", outcome_message(&s, &config.currency));
    Ok(())
}

fn cli_export(args: &[String], config: &Config) -> Result<()> {
    let ledger = load_ledger(args, config)?;
    let path = positional(args)
        .map(expand_home)
        .unwrap_or_else(|| config.default_export_path());

    let bytes = ledger.export_workbook()?;
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "workbook written");
    println!(
        "Exported {} expenses, {} members, {} sales to {} ({XLSX_MIME})",
        ledger.expenses().len(),
        ledger.member_count(),
        ledger.revenue().len(),
        path.display()
    );
    Ok(())
}

fn cli_template(args: &[String], config: &Config) -> Result<()> {
    let path = positional(args).map(expand_home).unwrap_or_else(|| {
        config
            .default_export_path()
            .with_file_name("modelo_evento.xlsx")
    });

    let bytes = Ledger::new(config.members).export_workbook()?;
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "Wrote empty workbook with {} members to {}",
        config.members,
        path.display()
    );
    Ok(())
}
