use crate::config::{CONFIG_FILE_NAME, PlaintsConfig};
use crate::storage::OptionRepository;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn handle_init(no_seed: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        anyhow::bail!("Project already initialized at {}", config_path.display());
    }

    let config = PlaintsConfig::default();

    let data_path = config.data_path(&cwd);
    std::fs::create_dir_all(data_path.join("complaints"))
        .with_context(|| format!("Failed to create {}", data_path.display()))?;

    config.save(&config_path)?;

    println!(
        "{} complaint store in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    println!("  Data:   {}", data_path.display());

    if no_seed {
        println!(
            "  {} option store left empty; lookups will use built-in values",
            "Note:".yellow()
        );
        return Ok(());
    }

    let options = OptionRepository::at(&data_path);
    options.seed().context("Failed to seed taxonomy options")?;
    let fixed = options.ensure_department_codes()?;
    let count = options.load()?.len();
    println!(
        "  Seeded {} taxonomy options ({} department codes set)",
        count, fixed
    );

    Ok(())
}
