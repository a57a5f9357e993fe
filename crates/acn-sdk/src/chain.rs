//! Contract-call encoding for the on-chain credit network
//!
//! Builds ABI calldata for the AgentCreditNetwork contract and the USDC token.
//! Nothing here signs or broadcasts; hand the calldata to a wallet.
//!
//! Amounts travel as USDC base units (6 decimals) and rates as basis points,
//! so 10% APR is `1000`.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::{SdkError, SdkResult};

/// USDC decimals
pub const USDC_DECIMALS: u32 = 6;

const WORD: usize = 32;

/// Where the contracts live on one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub explorer: String,
    pub usdc_address: String,
    /// Credit network contract, once deployed
    pub acn_contract: Option<String>,
}

impl NetworkConfig {
    pub fn polygon() -> Self {
        Self {
            name: "polygon".to_string(),
            chain_id: 137,
            rpc_url: "https://polygon.llamarpc.com".to_string(),
            explorer: "https://polygonscan.com".to_string(),
            usdc_address: "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174".to_string(),
            acn_contract: None,
        }
    }

    pub fn base() -> Self {
        Self {
            name: "base".to_string(),
            chain_id: 8453,
            rpc_url: "https://mainnet.base.org".to_string(),
            explorer: "https://basescan.org".to_string(),
            usdc_address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
            acn_contract: Some("0x715E54369C832BaEc27AdF0c2FA58f25a8512B27".to_string()),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "polygon" => Some(Self::polygon()),
            "base" => Some(Self::base()),
            _ => None,
        }
    }

    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer, tx_hash)
    }

    fn acn(&self) -> SdkResult<&str> {
        self.acn_contract.as_deref().ok_or_else(|| {
            SdkError::ConfigError(format!(
                "credit network contract is not deployed on {}",
                self.name
            ))
        })
    }

    /// `requestLoan(amount, rateBps, durationDays, purpose)`
    pub fn request_loan(
        &self,
        amount_usdc: f64,
        rate_pct: f64,
        duration_days: u32,
        purpose: &str,
    ) -> SdkResult<ContractCall> {
        let args = [
            AbiToken::Uint(usdc_to_base_units(amount_usdc)?),
            AbiToken::Uint(rate_to_basis_points(rate_pct)?),
            AbiToken::Uint(u128::from(duration_days)),
            AbiToken::String(purpose.to_string()),
        ];
        ContractCall::new(self.acn()?, "requestLoan(uint256,uint256,uint256,string)", &args)
    }

    pub fn fund_loan(&self, loan_id: u64) -> SdkResult<ContractCall> {
        ContractCall::new(self.acn()?, "fundLoan(uint256)", &[AbiToken::Uint(loan_id.into())])
    }

    pub fn repay_loan(&self, loan_id: u64) -> SdkResult<ContractCall> {
        ContractCall::new(self.acn()?, "repayLoan(uint256)", &[AbiToken::Uint(loan_id.into())])
    }

    pub fn get_loan(&self, loan_id: u64) -> SdkResult<ContractCall> {
        ContractCall::new(self.acn()?, "getLoan(uint256)", &[AbiToken::Uint(loan_id.into())])
    }

    pub fn get_credit_score(&self, agent: &str) -> SdkResult<ContractCall> {
        ContractCall::new(
            self.acn()?,
            "getCreditScore(address)",
            &[AbiToken::address(agent)?],
        )
    }

    pub fn usdc_balance_of(&self, owner: &str) -> SdkResult<ContractCall> {
        ContractCall::new(&self.usdc_address, "balanceOf(address)", &[AbiToken::address(owner)?])
    }

    /// Let the credit network pull `amount_usdc` when funding or repaying
    pub fn usdc_approve_acn(&self, amount_usdc: f64) -> SdkResult<ContractCall> {
        let spender = self.acn()?.to_string();
        self.usdc_approve(&spender, amount_usdc)
    }

    pub fn usdc_approve(&self, spender: &str, amount_usdc: f64) -> SdkResult<ContractCall> {
        ContractCall::new(
            &self.usdc_address,
            "approve(address,uint256)",
            &[
                AbiToken::address(spender)?,
                AbiToken::Uint(usdc_to_base_units(amount_usdc)?),
            ],
        )
    }

    pub fn usdc_transfer(&self, to: &str, amount_usdc: f64) -> SdkResult<ContractCall> {
        ContractCall::new(
            &self.usdc_address,
            "transfer(address,uint256)",
            &[
                AbiToken::address(to)?,
                AbiToken::Uint(usdc_to_base_units(amount_usdc)?),
            ],
        )
    }
}

/// Unsigned call: target contract plus calldata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    pub to: String,
    pub signature: String,
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
}

impl ContractCall {
    pub fn new(to: &str, signature: &str, args: &[AbiToken]) -> SdkResult<Self> {
        parse_address(to)?;
        let mut data = selector(signature).to_vec();
        data.extend(encode(args));
        Ok(Self {
            to: to.to_string(),
            signature: signature.to_string(),
            data,
        })
    }

    /// First four calldata bytes; `None` for calldata too short to hold one
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4)?.try_into().ok()
    }

    /// `0x`-prefixed calldata
    pub fn data_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(d)?;
        hex::decode(text.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

/// One ABI argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiToken {
    Uint(u128),
    Address([u8; 20]),
    String(String),
}

impl AbiToken {
    pub fn address(text: &str) -> SdkResult<Self> {
        Ok(Self::Address(parse_address(text)?))
    }
}

/// First four bytes of the Keccak-256 of a canonical signature
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

/// Head/tail ABI encoding of a flat argument list
pub fn encode(tokens: &[AbiToken]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            AbiToken::Uint(value) => head.extend(uint_word(*value)),
            AbiToken::Address(bytes) => {
                let mut word = [0u8; WORD];
                word[WORD - 20..].copy_from_slice(bytes);
                head.extend(word);
            }
            AbiToken::String(text) => {
                head.extend(uint_word((head_len + tail.len()) as u128));
                let bytes = text.as_bytes();
                tail.extend(uint_word(bytes.len() as u128));
                tail.extend_from_slice(bytes);
                let pad = (WORD - bytes.len() % WORD) % WORD;
                tail.extend(std::iter::repeat(0u8).take(pad));
            }
        }
    }

    head.extend(tail);
    head
}

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn parse_address(text: &str) -> SdkResult<[u8; 20]> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(digits)
        .map_err(|e| SdkError::ConfigError(format!("invalid address {}: {}", text, e)))?;
    bytes
        .try_into()
        .map_err(|_| SdkError::ConfigError(format!("invalid address {}: expected 20 bytes", text)))
}

/// Dollars to USDC base units, rounded to the nearest unit
pub fn usdc_to_base_units(amount: f64) -> SdkResult<u128> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(SdkError::ConfigError(format!("invalid USDC amount {}", amount)));
    }
    Ok((amount * 10f64.powi(USDC_DECIMALS as i32)).round() as u128)
}

pub fn usdc_from_base_units(units: u128) -> f64 {
    units as f64 / 10f64.powi(USDC_DECIMALS as i32)
}

/// Percent to basis points (12.5% → 1250)
pub fn rate_to_basis_points(rate_pct: f64) -> SdkResult<u128> {
    if !rate_pct.is_finite() || rate_pct < 0.0 {
        return Err(SdkError::ConfigError(format!("invalid rate {}", rate_pct)));
    }
    Ok((rate_pct * 100.0).round() as u128)
}
