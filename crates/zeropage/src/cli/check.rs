use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use std::path::PathBuf;
use zeropage_lib::{Result, Verdict};

use super::ScopeArgs;

pub fn handle_check_command(
    config_path: Option<PathBuf>,
    names: Vec<String>,
    scope: ScopeArgs,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let filter = scope.filter(config_path, verbose && !json)?;

    if json {
        let classification = filter.classify(&names);
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Filename", "Verdict"]);

    let mut placeholders = 0;
    for name in &names {
        let cell = match filter.verdict(name) {
            Ok(Verdict::Placeholder) => {
                placeholders += 1;
                Cell::new(Verdict::Placeholder.as_str()).fg(Color::Red)
            }
            Ok(Verdict::Keep) => Cell::new(Verdict::Keep.as_str()).fg(Color::Green),
            Err(e) => Cell::new(e.to_string()).fg(Color::Yellow),
        };
        table.add_row(vec![Cell::new(name), cell]);
    }

    println!("{}", table);
    println!(
        "\n{} of {} names are placeholder pages (splitter '{}')",
        style(placeholders).bold(),
        names.len(),
        filter.splitter()
    );

    Ok(())
}
