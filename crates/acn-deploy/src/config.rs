//! Deployment targets

use serde::{Deserialize, Serialize};

/// Address that receives protocol fees, passed to the credit network constructor
pub const DEFAULT_FEE_RECIPIENT: &str = "0x038d27D6c37fd21bb384358aE22D23eb509f234f";

/// Solidity compiler version pinned in the Hardhat config
pub const SOLIDITY_VERSION: &str = "0.8.19";

/// An EVM network as Hardhat knows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Key under `networks` in hardhat.config.js
    pub key: String,
    pub display_name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    /// Block explorer used for verification
    pub explorer: String,
    /// Environment variable holding the explorer API key
    pub explorer_api_key_env: String,
    /// Token that pays for gas
    pub gas_token: String,
}

impl Network {
    pub fn polygon() -> Self {
        Self {
            key: "polygon".to_string(),
            display_name: "Polygon".to_string(),
            chain_id: 137,
            rpc_url: "https://polygon.llamarpc.com".to_string(),
            explorer: "Polygonscan".to_string(),
            explorer_api_key_env: "POLYGONSCAN_API_KEY".to_string(),
            gas_token: "POL".to_string(),
        }
    }

    pub fn polygon_mumbai() -> Self {
        Self {
            key: "polygonMumbai".to_string(),
            display_name: "Polygon Mumbai".to_string(),
            chain_id: 80001,
            rpc_url: "https://rpc-mumbai.maticvigil.com".to_string(),
            explorer: "Polygonscan".to_string(),
            explorer_api_key_env: "POLYGONSCAN_API_KEY".to_string(),
            gas_token: "POL".to_string(),
        }
    }

    pub fn base() -> Self {
        Self {
            key: "base".to_string(),
            display_name: "Base".to_string(),
            chain_id: 8453,
            rpc_url: "https://mainnet.base.org".to_string(),
            explorer: "Basescan".to_string(),
            explorer_api_key_env: "BASESCAN_API_KEY".to_string(),
            gas_token: "ETH".to_string(),
        }
    }
}

/// A contract to deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSpec {
    pub name: String,
    pub file: String,
    /// Variable name in the generated script
    pub var_name: String,
    /// Constructor arguments, rendered as string literals
    pub args: Vec<String>,
}

impl ContractSpec {
    pub fn new(name: &str, var_name: &str, args: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            file: format!("{}.sol", name),
            var_name: var_name.to_string(),
            args,
        }
    }
}

/// Everything the generator needs to know about one deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub network: Network,
    /// Rehearsal network, if the target has one
    pub testnet: Option<Network>,
    pub fee_recipient: String,
    pub contracts: Vec<ContractSpec>,
}

impl DeploymentConfig {
    pub fn new(network: Network, testnet: Option<Network>) -> Self {
        Self {
            network,
            testnet,
            fee_recipient: DEFAULT_FEE_RECIPIENT.to_string(),
            contracts: default_contracts(DEFAULT_FEE_RECIPIENT),
        }
    }

    /// Polygon mainnet, rehearsed on Mumbai
    pub fn polygon() -> Self {
        Self::new(Network::polygon(), Some(Network::polygon_mumbai()))
    }

    pub fn polygon_mumbai() -> Self {
        Self::new(Network::polygon_mumbai(), None)
    }

    pub fn base() -> Self {
        Self::new(Network::base(), None)
    }

    /// Look up a preset by its network key
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "polygon" => Some(Self::polygon()),
            "polygonmumbai" | "polygon-mumbai" | "mumbai" => Some(Self::polygon_mumbai()),
            "base" => Some(Self::base()),
            _ => None,
        }
    }

    /// Replace the fee recipient everywhere it is passed to a constructor
    pub fn with_fee_recipient(mut self, recipient: impl Into<String>) -> Self {
        let recipient = recipient.into();
        for contract in &mut self.contracts {
            for arg in &mut contract.args {
                if *arg == self.fee_recipient {
                    *arg = recipient.clone();
                }
            }
        }
        self.fee_recipient = recipient;
        self
    }

    /// Target network first, then the testnet
    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        std::iter::once(&self.network).chain(self.testnet.as_ref())
    }

    /// File the generated script records addresses into
    pub fn deployment_record_file(&self) -> String {
        format!("deployment-{}.json", self.network.key)
    }
}

fn default_contracts(fee_recipient: &str) -> Vec<ContractSpec> {
    vec![
        ContractSpec::new("AgentCreditNetwork", "acn", vec![fee_recipient.to_string()]),
        ContractSpec::new("CreditOracle", "oracle", Vec::new()),
    ]
}
