//! Listed option contracts and chains.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Side of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl OptionSide {
    /// Returns the lowercase side label used in exports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single listed option contract.
///
/// Quote fields the provider did not report are `None`; they stay empty in
/// exports rather than being zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Exchange contract symbol.
    pub contract_symbol: String,
    /// Strike price.
    pub strike: f64,
    /// Last traded price.
    pub last_price: f64,
    /// Best bid.
    pub bid: Option<f64>,
    /// Best ask.
    pub ask: Option<f64>,
    /// Session volume.
    pub volume: Option<u64>,
    /// Open interest.
    pub open_interest: Option<u64>,
    /// Implied volatility.
    pub implied_volatility: Option<f64>,
    /// Whether the contract is in the money.
    pub in_the_money: bool,
}

/// An option chain for one symbol and expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Underlying symbol.
    pub symbol: String,
    /// Expiration this chain covers.
    pub expiration: NaiveDate,
    /// All expirations the provider offers for the symbol.
    pub expirations: Vec<NaiveDate>,
    /// Date the chain was retrieved.
    pub retrieved: NaiveDate,
    /// Call contracts, ascending by strike.
    pub calls: Vec<OptionContract>,
    /// Put contracts, ascending by strike.
    pub puts: Vec<OptionContract>,
}

impl OptionChain {
    /// Returns the total number of contracts in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }

    /// Returns true if the chain has no contracts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }

    /// Iterates over all contracts, calls first, each tagged with its side.
    pub fn contracts(&self) -> impl Iterator<Item = (OptionSide, &OptionContract)> {
        self.calls
            .iter()
            .map(|c| (OptionSide::Call, c))
            .chain(self.puts.iter().map(|p| (OptionSide::Put, p)))
    }
}
