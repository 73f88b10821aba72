use comfy_table::{presets::UTF8_FULL, Cell, Table};
use console::style;
use std::path::PathBuf;
use zeropage_lib::config::CONFIG_ENV;
use zeropage_lib::{Config, Result};

#[derive(clap::Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show the configuration resolved for a project and step")]
    Show {
        #[arg(long, default_value = "*", help = "Project name")]
        project: String,

        #[arg(long, default_value = "*", help = "Step name")]
        step: String,
    },
}

pub fn handle_config_command(config_path: Option<PathBuf>, action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show { project, step } => show_config(config_path, &project, &step),
    }
}

fn show_config(config_path: Option<PathBuf>, project: &str, step: &str) -> Result<()> {
    let config = Config::new(config_path)?;

    println!("{}", style("Source").bold());
    match &config.config_path {
        Some(path) => println!("  {}", path.display()),
        None => println!(
            "  (built-in defaults; set {} or use --config to load a file)",
            CONFIG_ENV
        ),
    }

    let resolved = config.resolve(project, step);
    println!("\n{}", style("Resolved").bold());
    println!("  Project: {}", project);
    println!("  Step: {}", step);
    println!(
        "  Matched block: project = {}, step = {}",
        resolved.project, resolved.step
    );
    println!("  Name part splitter: '{}'", style(&resolved.namepart_splitter).cyan());

    if !config.blocks.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Project", "Step", "Splitter"]);

        for block in &config.blocks {
            table.add_row(vec![
                Cell::new(&block.project),
                Cell::new(&block.step),
                Cell::new(block.namepart_splitter.as_str()),
            ]);
        }

        println!("\n{} ({} blocks)", style("Blocks").bold(), config.blocks.len());
        println!("{}", table);
    }

    Ok(())
}
