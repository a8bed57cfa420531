use std::path::PathBuf;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>, endpoint: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(url) = endpoint {
        settings.upload_endpoint = url;
    }

    let data_path = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&data_path)?;
    std::fs::create_dir_all(settings.exports_dir())?;

    let ledger_path = settings.ledger_path();
    if !ledger_path.exists() {
        Ledger::default().save(&ledger_path)?;
    }
    save_settings(&settings)?;

    println!("Data directory: {}", data_path.display());
    println!("Ledger:         {}", ledger_path.display());
    println!("Upload to:      {}", settings.upload_endpoint);
    println!();
    println!("Run `finhub demo` to load sample data or `finhub tx add` to start.");
    Ok(())
}
