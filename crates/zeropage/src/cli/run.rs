use comfy_table::{presets::UTF8_FULL, Cell, Table};
use console::style;
use dialoguer::Confirm;
use std::path::PathBuf;
use zeropage_lib::util::format::{elapsed, format_duration, format_timestamp};
use zeropage_lib::util::progress::create_progress_bar;
use zeropage_lib::{
    CleanupOptions, CleanupPlan, CleanupReport, CleanupStep, LocalStorage, Result,
};

use super::ScopeArgs;

pub struct RunArgs {
    pub folders: Vec<PathBuf>,
    pub scope: ScopeArgs,
    pub execute: bool,
    pub yes: bool,
    pub json: bool,
}

pub fn handle_run_command(
    config_path: Option<PathBuf>,
    args: RunArgs,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let filter = args.scope.filter(config_path, verbose && !args.json)?;
    let storage = LocalStorage::new();
    let dry_run = !args.execute;
    let step = CleanupStep::new(&storage, filter, CleanupOptions { dry_run });

    let show = !args.json && !quiet;

    if show && verbose {
        let mode = if dry_run { "dry run" } else { "execute" };
        println!(
            "{} Scanning {} folder(s) ({})...",
            style(">>>").cyan(),
            args.folders.len(),
            mode
        );
    }

    let plan = step.scan(&args.folders);

    if show {
        print_plan(&plan);
    }

    if !dry_run && !plan.placeholders.is_empty() && !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} placeholder page(s)?", plan.placeholders.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", style("Aborted, nothing deleted").yellow());
            return Ok(());
        }
    }

    let pb = if show && !verbose && !dry_run && !plan.placeholders.is_empty() {
        Some(create_progress_bar(plan.placeholders.len() as u64, "Deleting placeholder pages"))
    } else {
        None
    };

    let report = step.execute(plan, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        print_summary(&report);
    }

    Ok(())
}

fn print_plan(plan: &CleanupPlan) {
    for folder in &plan.missing_folders {
        println!("  {}: {} (not found)", style("·").dim(), folder.display());
    }

    for failure in &plan.failed_folders {
        println!(
            "  {}: {} ({})",
            style("✗").red(),
            failure.path.display(),
            failure.error
        );
    }

    if plan.placeholders.is_empty() {
        println!("{}", style("No placeholder pages found").green());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Folder", "Placeholder"]);

    for (i, path) in plan.placeholders.iter().enumerate() {
        let folder = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        table.add_row(vec![Cell::new(i + 1), Cell::new(folder), Cell::new(name)]);
    }

    println!("{}", table);
}

fn print_summary(report: &CleanupReport) {
    let summary = report.summary();

    if report.dry_run {
        println!("\n{} Dry run complete, nothing deleted", style("✓").green());
        println!("  Would delete: {}", style(summary.deleted).cyan());
    } else {
        println!("\n{} Cleanup complete", style("✓").green());
        println!("  Deleted: {}", style(summary.deleted).green());
    }

    println!("  Kept: {}", summary.kept);
    println!("  Files seen: {}", report.files_seen);

    if summary.malformed > 0 {
        println!("  Skipped (no extension): {}", style(summary.malformed).yellow());
    }

    if summary.failed > 0 {
        println!("  Failed: {}", style(summary.failed).red());
        for failure in &report.failed {
            println!("    {} ({})", failure.path.display(), failure.error);
        }
    }

    println!(
        "  Started: {} ({})",
        format_timestamp(&report.started_at),
        format_duration(elapsed(&report.started_at, &report.finished_at))
    );

    if report.dry_run && summary.deleted > 0 {
        println!("\nRun again with --execute to delete these files");
    }
}
