//! Funds the faucet's fee purse from one of the user's purses.

use anyhow::{Context, Result};

use crate::{Amount, Faucet, Purse, Wallet};

/// Move the whole current balance of the wallet purse named `purse_petname`
/// into the faucet's fee purse.
///
/// The balance is read once and withdrawn as reported; what the remote purse
/// does with an empty amount is up to it. Returns the transferred amount.
pub async fn send_deposit<W, F>(wallet: &W, faucet: &F, purse_petname: &str) -> Result<Amount>
where
    W: Wallet,
    F: Faucet,
{
    let purse = wallet
        .get_purse(purse_petname)
        .await
        .with_context(|| format!("Failed to look up purse '{}'", purse_petname))?;

    let amount = purse
        .get_current_amount()
        .await
        .with_context(|| format!("Failed to read balance of purse '{}'", purse_petname))?;

    if amount.is_empty() {
        tracing::warn!(purse = purse_petname, brand = %amount.brand, "Funding purse is empty");
    }

    let payment = purse
        .withdraw(&amount)
        .await
        .with_context(|| format!("Failed to withdraw from purse '{}'", purse_petname))?;

    let fee_purse = faucet
        .get_fee_purse()
        .await
        .context("Failed to get the faucet fee purse")?;

    fee_purse
        .deposit(payment)
        .await
        .context("Failed to deposit into the faucet fee purse")?;

    tracing::info!(
        purse = purse_petname,
        brand = %amount.brand,
        value = %amount.value,
        "Fee purse funded"
    );

    Ok(amount)
}
