//! Hardhat bundle generation

use std::path::Path;

use acn_deploy::{checklist, write_bundle, DeploymentConfig};

use crate::display;

fn preset(network: &str, fee_recipient: Option<&str>) -> anyhow::Result<DeploymentConfig> {
    let config = DeploymentConfig::preset(network).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown network '{}' (expected polygon, polygon-mumbai or base)",
            network
        )
    })?;
    Ok(match fee_recipient {
        Some(recipient) => config.with_fee_recipient(recipient),
        None => config,
    })
}

pub fn generate(network: &str, out: &Path, fee_recipient: Option<&str>) -> anyhow::Result<()> {
    let config = preset(network, fee_recipient)?;
    let written = write_bundle(&config, out)?;

    display::section(&format!("Deployment bundle: {}", config.network.display_name));
    for path in &written {
        display::success(&path.display().to_string());
    }
    println!();
    display::info("Next: npm install, fill in .env, then npm run deploy");
    Ok(())
}

pub fn show_checklist(network: &str) -> anyhow::Result<()> {
    let config = preset(network, None)?;
    println!("{}", checklist(&config));
    Ok(())
}
