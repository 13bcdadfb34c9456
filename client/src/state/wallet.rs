//! Wallet connection state as seen by the navbar and the registration form.
//!
//! The wallet itself is an opaque browser capability (see `util::wallet`);
//! this model only records what it last reported.

#[cfg(test)]
#[path = "wallet_test.rs"]
mod wallet_test;

pub const METIS_CHAIN_ID: u64 = 1088;
pub const METIS_TESTNET_CHAIN_ID: u64 = 588;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletState {
    pub account: Option<String>,
    pub chain_id: Option<u64>,
    pub connecting: bool,
    pub error: Option<String>,
}

impl WalletState {
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Connected to a chain other than Metis mainnet or testnet.
    #[must_use]
    pub fn wrong_network(&self) -> bool {
        self.is_connected() && !self.chain_id.is_some_and(is_metis_chain)
    }

    /// Record the outcome of a connect attempt.
    pub fn finish_connect(&mut self, result: Result<(String, Option<u64>), String>) {
        self.connecting = false;
        match result {
            Ok((account, chain_id)) => {
                self.account = Some(account);
                self.chain_id = chain_id;
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
    }

    /// Forget the account locally. EIP-1193 wallets have no revoke call.
    pub fn disconnect(&mut self) {
        self.account = None;
        self.chain_id = None;
        self.error = None;
    }
}

#[must_use]
pub fn is_metis_chain(chain_id: u64) -> bool {
    chain_id == METIS_CHAIN_ID || chain_id == METIS_TESTNET_CHAIN_ID
}

/// Parse an EIP-1193 `eth_chainId` value (`"0x440"`), tolerating decimal.
#[must_use]
pub fn parse_chain_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

/// Hex chain id for `wallet_switchEthereumChain`.
#[must_use]
pub fn chain_id_hex(chain_id: u64) -> String {
    format!("0x{chain_id:x}")
}
