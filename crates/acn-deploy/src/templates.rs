//! Text artifacts for a Hardhat project
//!
//! Output is static text; nothing here parses or validates JavaScript.

use serde_json::json;

use crate::config::{DeploymentConfig, SOLIDITY_VERSION};

fn js_args(args: &[String]) -> String {
    args.iter()
        .map(|arg| format!("\"{}\"", arg))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `deploy.js`: deploys every contract, records addresses, prints verify commands
pub fn deployment_script(config: &DeploymentConfig) -> String {
    let network = &config.network;
    let record_file = config.deployment_record_file();
    let mut lines = vec![
        "const { ethers } = require(\"hardhat\");".to_string(),
        String::new(),
        "async function main() {".to_string(),
        format!(
            "    console.log(\"Deploying ACN contracts to {}...\");",
            network.display_name
        ),
        String::new(),
        "    const [deployer] = await ethers.getSigners();".to_string(),
        "    console.log(\"Deploying with account:\", deployer.address);".to_string(),
    ];

    for contract in &config.contracts {
        let factory = format!("{}Factory", contract.var_name);
        lines.push(String::new());
        lines.push(format!("    // Deploy {}", contract.name));
        lines.push(format!(
            "    console.log(\"\\nDeploying {}...\");",
            contract.name
        ));
        lines.push(format!(
            "    const {} = await ethers.getContractFactory(\"{}\");",
            factory, contract.name
        ));
        lines.push(format!(
            "    const {} = await {}.deploy({});",
            contract.var_name,
            factory,
            js_args(&contract.args)
        ));
        lines.push(format!("    await {}.deployed();", contract.var_name));
        lines.push(format!(
            "    console.log(\"{} deployed to:\", {}.address);",
            contract.name, contract.var_name
        ));
    }

    lines.push(String::new());
    lines.push("    const deploymentInfo = {".to_string());
    lines.push(format!("        network: \"{}\",", network.key));
    lines.push(format!("        chainId: {},", network.chain_id));
    lines.push("        timestamp: new Date().toISOString(),".to_string());
    lines.push("        contracts: {".to_string());
    for contract in &config.contracts {
        lines.push(format!(
            "            {}: {}.address,",
            contract.name, contract.var_name
        ));
    }
    lines.push("        },".to_string());
    lines.push(format!("        feeRecipient: \"{}\",", config.fee_recipient));
    lines.push("        deployer: deployer.address".to_string());
    lines.push("    };".to_string());
    lines.push(String::new());
    lines.push("    require(\"fs\").writeFileSync(".to_string());
    lines.push(format!("        \"{}\",", record_file));
    lines.push("        JSON.stringify(deploymentInfo, null, 2)".to_string());
    lines.push("    );".to_string());
    lines.push(format!(
        "    console.log(\"\\nDeployment info saved to {}\");",
        record_file
    ));
    lines.push(String::new());
    lines.push(format!(
        "    console.log(\"\\nTo verify on {}:\");",
        network.explorer
    ));
    for contract in &config.contracts {
        let args = if contract.args.is_empty() {
            String::new()
        } else {
            format!(" {}", contract.args.join(" "))
        };
        lines.push(format!(
            "    console.log(`npx hardhat verify --network {} ${{{}.address}}{}`);",
            network.key, contract.var_name, args
        ));
    }
    lines.push("}".to_string());
    lines.push(String::new());
    lines.push("main()".to_string());
    lines.push("    .then(() => process.exit(0))".to_string());
    lines.push("    .catch((error) => {".to_string());
    lines.push("        console.error(error);".to_string());
    lines.push("        process.exit(1);".to_string());
    lines.push("    });".to_string());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// `hardhat.config.js` with the target and testnet networks
pub fn hardhat_config(config: &DeploymentConfig) -> String {
    let mut key_vars: Vec<&str> = Vec::new();
    for network in config.networks() {
        if !key_vars.contains(&network.explorer_api_key_env.as_str()) {
            key_vars.push(&network.explorer_api_key_env);
        }
    }

    let mut lines = vec![
        "require(\"@nomicfoundation/hardhat-toolbox\");".to_string(),
        "require(\"@nomicfoundation/hardhat-verify\");".to_string(),
        "require(\"dotenv\").config();".to_string(),
        String::new(),
        "const PRIVATE_KEY = process.env.DEPLOYER_PRIVATE_KEY || \"\";".to_string(),
    ];
    for var in &key_vars {
        lines.push(format!("const {var} = process.env.{var} || \"\";"));
    }

    lines.extend([
        String::new(),
        "module.exports = {".to_string(),
        "    solidity: {".to_string(),
        format!("        version: \"{}\",", SOLIDITY_VERSION),
        "        settings: {".to_string(),
        "            optimizer: {".to_string(),
        "                enabled: true,".to_string(),
        "                runs: 200".to_string(),
        "            }".to_string(),
        "        }".to_string(),
        "    },".to_string(),
        "    networks: {".to_string(),
    ]);

    let networks: Vec<_> = config.networks().collect();
    for (i, network) in networks.iter().enumerate() {
        let sep = if i + 1 < networks.len() { "," } else { "" };
        lines.push(format!("        {}: {{", network.key));
        lines.push(format!("            url: \"{}\",", network.rpc_url));
        lines.push("            accounts: PRIVATE_KEY ? [PRIVATE_KEY] : [],".to_string());
        lines.push(format!("            chainId: {}", network.chain_id));
        lines.push(format!("        }}{}", sep));
    }

    lines.push("    },".to_string());
    lines.push("    etherscan: {".to_string());
    lines.push("        apiKey: {".to_string());
    for (i, network) in networks.iter().enumerate() {
        let sep = if i + 1 < networks.len() { "," } else { "" };
        lines.push(format!(
            "            {}: {}{}",
            network.key, network.explorer_api_key_env, sep
        ));
    }
    lines.extend([
        "        }".to_string(),
        "    },".to_string(),
        "    gasReporter: {".to_string(),
        "        enabled: true,".to_string(),
        "        currency: \"USD\",".to_string(),
        "        coinmarketcap: process.env.COINMARKETCAP_API_KEY".to_string(),
        "    }".to_string(),
        "};".to_string(),
    ]);

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// `.env.example` listing every secret the config reads
pub fn env_template(config: &DeploymentConfig) -> String {
    let mut text = String::from(
        "# ACN Deployment Configuration\n\
         # NEVER COMMIT THIS FILE WITH REAL VALUES\n\n",
    );
    text.push_str(&format!(
        "# Deployer wallet private key (must hold {} for gas)\n\
         DEPLOYER_PRIVATE_KEY=your_private_key_here\n\n",
        config.network.gas_token
    ));

    let mut seen: Vec<&str> = Vec::new();
    for network in config.networks() {
        if seen.contains(&network.explorer_api_key_env.as_str()) {
            continue;
        }
        seen.push(&network.explorer_api_key_env);
        text.push_str(&format!(
            "# {} API key (for contract verification)\n{}=your_{}\n\n",
            network.explorer,
            network.explorer_api_key_env,
            network.explorer_api_key_env.to_ascii_lowercase()
        ));
    }

    text.push_str(
        "# CoinMarketCap API key (for gas reporting)\n\
         COINMARKETCAP_API_KEY=your_cmc_api_key\n",
    );
    text
}

/// `package.json` with compile/test/deploy scripts
pub fn package_json(config: &DeploymentConfig) -> String {
    let mut scripts = serde_json::Map::new();
    scripts.insert("compile".into(), json!("hardhat compile"));
    scripts.insert("test".into(), json!("hardhat test"));
    if let Some(testnet) = &config.testnet {
        scripts.insert(
            "deploy:testnet".into(),
            json!(format!("hardhat run deploy.js --network {}", testnet.key)),
        );
    }
    scripts.insert(
        "deploy:mainnet".into(),
        json!(format!("hardhat run deploy.js --network {}", config.network.key)),
    );
    scripts.insert("verify".into(), json!("hardhat verify"));

    let manifest = json!({
        "name": "acn-contracts",
        "version": "1.0.0",
        "description": "Agent Credit Network Smart Contracts",
        "scripts": scripts,
        "devDependencies": {
            "@nomicfoundation/hardhat-toolbox": "^4.0.0",
            "@nomicfoundation/hardhat-verify": "^2.0.0",
            "dotenv": "^16.3.1",
            "hardhat": "^2.19.0"
        }
    });

    let mut text = serde_json::to_string_pretty(&manifest).unwrap_or_default();
    text.push('\n');
    text
}

/// Operator checklist, grouped by phase
pub fn checklist(config: &DeploymentConfig) -> String {
    let network = &config.network;
    let mut lines = vec![
        "ACN SMART CONTRACT DEPLOYMENT CHECKLIST".to_string(),
        String::new(),
        "PRE-DEPLOYMENT:".to_string(),
        "- [ ] Install Hardhat: npm install --save-dev hardhat".to_string(),
        "- [ ] Install dependencies: npm install @nomicfoundation/hardhat-toolbox".to_string(),
        "- [ ] Copy contracts to contracts/ folder".to_string(),
        "- [ ] Create .env file with DEPLOYER_PRIVATE_KEY".to_string(),
        format!(
            "- [ ] Fund deployer wallet with {} on {}",
            network.gas_token, network.display_name
        ),
        String::new(),
        "DEPLOYMENT:".to_string(),
        "- [ ] Compile contracts: npx hardhat compile".to_string(),
        "- [ ] Run tests: npx hardhat test".to_string(),
    ];
    if let Some(testnet) = &config.testnet {
        lines.push(format!(
            "- [ ] Deploy to testnet: npx hardhat run deploy.js --network {}",
            testnet.key
        ));
        lines.push("- [ ] Test on testnet".to_string());
    }
    lines.extend([
        format!(
            "- [ ] Deploy to mainnet: npx hardhat run deploy.js --network {}",
            network.key
        ),
        format!("- [ ] Verify contracts on {}", network.explorer),
        String::new(),
        "POST-DEPLOYMENT:".to_string(),
        "- [ ] Update frontend with contract addresses".to_string(),
        "- [ ] Update skill with contract addresses".to_string(),
        "- [ ] Test $1 loan end-to-end".to_string(),
        "- [ ] Announce launch".to_string(),
        String::new(),
        format!("Fee Recipient: {}", config.fee_recipient),
    ]);

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_deploys_every_contract() {
        let script = deployment_script(&DeploymentConfig::polygon());
        assert!(script.contains("getContractFactory(\"AgentCreditNetwork\")"));
        assert!(script.contains("getContractFactory(\"CreditOracle\")"));
        assert!(script.contains(
            "acnFactory.deploy(\"0x038d27D6c37fd21bb384358aE22D23eb509f234f\")"
        ));
        assert!(script.contains("oracleFactory.deploy()"));
        assert!(script.contains("deployment-polygon.json"));
    }

    #[test]
    fn test_verify_commands_target_the_deployed_network() {
        let script = deployment_script(&DeploymentConfig::polygon());
        assert!(script.contains("npx hardhat verify --network polygon ${acn.address} 0x038d"));
        assert!(!script.contains("--network base"));

        let base = deployment_script(&DeploymentConfig::base());
        assert!(base.contains("npx hardhat verify --network base ${oracle.address}`"));
    }

    #[test]
    fn test_hardhat_config_lists_testnet() {
        let config = hardhat_config(&DeploymentConfig::polygon());
        assert!(config.contains("version: \"0.8.19\""));
        assert!(config.contains("url: \"https://polygon.llamarpc.com\""));
        assert!(config.contains("chainId: 80001"));
        assert_eq!(
            config.matches("const POLYGONSCAN_API_KEY").count(),
            1
        );

        let base = hardhat_config(&DeploymentConfig::base());
        assert!(base.contains("chainId: 8453"));
        assert!(base.contains("base: BASESCAN_API_KEY"));
        assert!(!base.contains("polygonMumbai"));
    }

    #[test]
    fn test_env_template_mentions_every_secret() {
        let env = env_template(&DeploymentConfig::base());
        assert!(env.contains("DEPLOYER_PRIVATE_KEY="));
        assert!(env.contains("BASESCAN_API_KEY="));
        assert!(env.contains("COINMARKETCAP_API_KEY="));
        assert!(env.contains("must hold ETH"));
    }

    #[test]
    fn test_package_json_is_valid_json() {
        let text = package_json(&DeploymentConfig::polygon());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "acn-contracts");
        assert_eq!(
            value["scripts"]["deploy:testnet"],
            "hardhat run deploy.js --network polygonMumbai"
        );

        let base: serde_json::Value =
            serde_json::from_str(&package_json(&DeploymentConfig::base())).unwrap();
        assert!(base["scripts"].get("deploy:testnet").is_none());
    }

    #[test]
    fn test_checklist_ends_with_fee_recipient() {
        let text = checklist(&DeploymentConfig::polygon_mumbai());
        assert!(text.contains("PRE-DEPLOYMENT:"));
        assert!(!text.contains("Deploy to testnet"));
        assert!(text
            .trim_end()
            .ends_with("Fee Recipient: 0x038d27D6c37fd21bb384358aE22D23eb509f234f"));
    }
}
