use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use std::fs;

/// Show the configuration file or its location.
pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config, path } = cmd {
        let file = Config::config_file();

        if *path {
            println!("{}", file.display());
            return Ok(());
        }

        if *print_config {
            if file.exists() {
                println!("📄 Configuration ({}):\n", file.display());
                print!("{}", fs::read_to_string(&file)?);
            } else {
                info(format!(
                    "No configuration file at {} (defaults are in effect).",
                    file.display()
                ));
            }
        }
    }

    Ok(())
}
