//! Capability traits for the remote objects a deploy runs against.
//!
//! Every remote object is reached through one of these traits. The deploy
//! flow never inspects the handles it receives, it only passes them on to the
//! next call.

use std::{fmt, future::Future};

use anyhow::Result;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Visitor},
};

use crate::Bundle;

/// Opaque reference to a remote presence.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct RemoteRef(String);

impl RemoteRef {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }
}

impl From<&str> for RemoteRef {
    fn from(target: &str) -> Self {
        Self::new(target)
    }
}

/// Unforgeable reference to installed contract code.
pub type InstallationHandle = RemoteRef;

/// A payment withdrawn from a purse, waiting to be deposited.
pub type Payment = RemoteRef;

/// Stable string identifier handed out by the board.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Quantity of a fungible asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// The brand the value is denominated in.
    pub brand: String,
    /// The value, in the brand's smallest unit.
    #[serde(deserialize_with = "deserialize_value")]
    pub value: u128,
}

impl Amount {
    pub fn new(brand: impl Into<String>, value: u128) -> Self {
        Self {
            brand: brand.into(),
            value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }
}

/// Amount values arrive either as JSON numbers or as decimal strings.
///
/// Values above `u64::MAX` only survive the trip as strings.
fn deserialize_value<'de, D>(deserializer: D) -> std::result::Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    struct ValueVisitor;

    impl Visitor<'_> for ValueVisitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<u128, E> {
            Ok(v.into())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<u128, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<u128, E> {
            v.trim().parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(ValueVisitor)
}

/// The contract-hosting service.
pub trait ContractHost: Send + Sync {
    /// Install a bundle, returning a handle to the installed code.
    fn install(&self, bundle: &Bundle) -> impl Future<Output = Result<InstallationHandle>> + Send;
}

/// The public naming registry.
pub trait Board: Send + Sync {
    /// Get the id registered for `value`, registering it first if needed.
    fn get_id(&self, value: &RemoteRef) -> impl Future<Output = Result<BoardId>> + Send;
}

/// Holder of a fungible balance.
pub trait Purse: Send + Sync {
    fn get_current_amount(&self) -> impl Future<Output = Result<Amount>> + Send;

    fn withdraw(&self, amount: &Amount) -> impl Future<Output = Result<Payment>> + Send;

    /// Deposit a payment, returning the deposited amount.
    fn deposit(&self, payment: Payment) -> impl Future<Output = Result<Amount>> + Send;
}

/// The user's wallet.
pub trait Wallet: Send + Sync {
    type Purse: Purse;

    /// Look up a purse by its petname.
    fn get_purse(&self, petname: &str) -> impl Future<Output = Result<Self::Purse>> + Send;
}

/// The faucet contract's public facet.
pub trait Faucet: Send + Sync {
    type Purse: Purse;

    /// The purse that pays fees for future interactions with the faucet.
    fn get_fee_purse(&self) -> impl Future<Output = Result<Self::Purse>> + Send;
}

/// The set of remote presences a deploy runs against.
pub struct Home<Z, B, W, F> {
    pub zoe: Z,
    pub board: B,
    pub wallet: W,
    pub faucet: F,
}
