//! Cartage CLI - argument parsing, configuration, and the interactive
//! shell

pub mod cli;
pub mod config;
pub mod output;
pub mod shell;

use std::io;

use cartage_types::Result;

use cli::Cli;
use config::Config;

/// Entry point shared with the binary: resolve config, load the
/// ledger, run the shell, flush the tables on exit.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(data_dir) = cli.set_data_dir {
        config.data_dir = Some(data_dir);
        config.save()?;
        println!("{}", config);
        return Ok(());
    }
    if cli.show_config {
        println!("{}", config);
        return Ok(());
    }

    let format = cli.format.unwrap_or(config.output_format);
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir());

    let mut ledger = cartage_infra::load_ledger(&data_dir);
    let stdin = io::stdin();
    let mut shell = shell::Shell::new(stdin.lock(), format);
    shell.run(&mut ledger)?;

    // exit always rewrites all four tables
    let failures = cartage_infra::save_ledger(&ledger, &data_dir);
    if failures == 0 {
        println!("Data saved to {}. Goodbye!", data_dir.display());
    } else {
        println!("Exited with {} table(s) unsaved; see messages above.", failures);
    }
    Ok(())
}
