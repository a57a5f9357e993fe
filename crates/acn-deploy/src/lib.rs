//! ACN Deploy - Hardhat bundle generator
//!
//! Produces the files an operator needs to deploy the AgentCreditNetwork and
//! CreditOracle contracts: a deploy script, a Hardhat config, an env template
//! and a package manifest. The contracts themselves live elsewhere.

pub mod config;
pub mod templates;

pub use config::{ContractSpec, DeploymentConfig, Network, DEFAULT_FEE_RECIPIENT, SOLIDITY_VERSION};
pub use templates::{checklist, deployment_script, env_template, hardhat_config, package_json};

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DeployError>;

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub contents: String,
}

/// Every file of the bundle, in write order
pub fn bundle(config: &DeploymentConfig) -> Vec<Artifact> {
    vec![
        Artifact {
            file_name: "deploy.js",
            contents: deployment_script(config),
        },
        Artifact {
            file_name: "hardhat.config.js",
            contents: hardhat_config(config),
        },
        Artifact {
            file_name: ".env.example",
            contents: env_template(config),
        },
        Artifact {
            file_name: "package.json",
            contents: package_json(config),
        },
    ]
}

/// Write the bundle into `dir`, creating it if needed; returns the written paths
pub fn write_bundle(config: &DeploymentConfig, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| DeployError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut written = Vec::new();
    for artifact in bundle(config) {
        let path = dir.join(artifact.file_name);
        std::fs::write(&path, artifact.contents.as_bytes()).map_err(|source| DeployError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Wrote deployment artifact");
        written.push(path);
    }

    tracing::info!(
        network = %config.network.key,
        dir = %dir.display(),
        files = written.len(),
        "Deployment bundle generated"
    );
    Ok(written)
}
