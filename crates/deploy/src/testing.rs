//! In-memory doubles of the remote home objects.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};

use crate::{
    Amount, Board, BoardId, Bundle, ContractHost, Faucet, InstallationHandle, Payment, Purse,
    RemoteRef, Wallet,
};

/// Hands out installation handles, one per distinct bundle digest.
#[derive(Debug, Default)]
pub struct MemoryZoe {
    installs: Mutex<Vec<InstallationHandle>>,
    by_digest: Mutex<HashMap<String, InstallationHandle>>,
}

impl MemoryZoe {
    pub fn install_count(&self) -> usize {
        self.installs.lock().unwrap().len()
    }

    pub fn installations(&self) -> Vec<InstallationHandle> {
        self.installs.lock().unwrap().clone()
    }
}

impl ContractHost for MemoryZoe {
    async fn install(&self, bundle: &Bundle) -> Result<InstallationHandle> {
        let mut by_digest = self.by_digest.lock().unwrap();
        let next = by_digest.len();
        let handle = by_digest
            .entry(bundle.archive_sha512.clone())
            .or_insert_with(|| RemoteRef::new(format!("installation:{}", next)))
            .clone();

        self.installs.lock().unwrap().push(handle.clone());
        Ok(handle)
    }
}

/// Contract host whose every install rejects.
#[derive(Debug, Default)]
pub struct FailingZoe;

impl ContractHost for FailingZoe {
    async fn install(&self, _bundle: &Bundle) -> Result<InstallationHandle> {
        anyhow::bail!("install rejected")
    }
}

/// Get-or-create registry.
#[derive(Debug, Default)]
pub struct MemoryBoard {
    ids: Mutex<HashMap<RemoteRef, BoardId>>,
}

impl MemoryBoard {
    pub fn lookup(&self, id: &BoardId) -> Option<RemoteRef> {
        self.ids
            .lock()
            .unwrap()
            .iter()
            .find(|(_, registered)| *registered == id)
            .map(|(value, _)| value.clone())
    }
}

impl Board for MemoryBoard {
    async fn get_id(&self, value: &RemoteRef) -> Result<BoardId> {
        let mut ids = self.ids.lock().unwrap();
        let next = ids.len();
        Ok(ids
            .entry(value.clone())
            .or_insert_with(|| BoardId::new(format!("board0{}", 256 + next)))
            .clone())
    }
}

/// Board whose every call rejects.
#[derive(Debug, Default)]
pub struct FailingBoard;

impl Board for FailingBoard {
    async fn get_id(&self, _value: &RemoteRef) -> Result<BoardId> {
        anyhow::bail!("board unavailable")
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    purses: HashMap<RemoteRef, Amount>,
    payments: HashMap<RemoteRef, Amount>,
    next_ref: usize,
}

impl LedgerState {
    fn fresh_ref(&mut self, kind: &str) -> RemoteRef {
        self.next_ref += 1;
        RemoteRef::new(format!("{}:{}", kind, self.next_ref))
    }
}

/// Balances of every purse and in-flight payment.
#[derive(Debug, Clone, Default)]
pub struct Ledger(Arc<Mutex<LedgerState>>);

impl Ledger {
    fn open_purse(&self, initial: Amount) -> MemoryPurse {
        let mut state = self.0.lock().unwrap();
        let id = state.fresh_ref("purse");
        state.purses.insert(id.clone(), initial);
        MemoryPurse {
            ledger: self.clone(),
            id,
        }
    }

    fn balance(&self, purse: &RemoteRef) -> Option<u128> {
        self.0.lock().unwrap().purses.get(purse).map(|a| a.value)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryPurse {
    ledger: Ledger,
    id: RemoteRef,
}

impl Purse for MemoryPurse {
    async fn get_current_amount(&self) -> Result<Amount> {
        let state = self.ledger.0.lock().unwrap();
        state.purses.get(&self.id).cloned().context("purse is gone")
    }

    async fn withdraw(&self, amount: &Amount) -> Result<Payment> {
        let mut state = self.ledger.0.lock().unwrap();
        let balance = state.purses.get_mut(&self.id).context("purse is gone")?;
        if balance.brand != amount.brand || balance.value < amount.value {
            anyhow::bail!("insufficient funds");
        }
        balance.value -= amount.value;

        let payment = state.fresh_ref("payment");
        state.payments.insert(payment.clone(), amount.clone());
        Ok(payment)
    }

    async fn deposit(&self, payment: Payment) -> Result<Amount> {
        let mut state = self.ledger.0.lock().unwrap();
        let amount = state.payments.remove(&payment).context("payment already used")?;
        let balance = state.purses.get_mut(&self.id).context("purse is gone")?;
        if balance.brand != amount.brand {
            anyhow::bail!("wrong brand");
        }
        balance.value += amount.value;
        Ok(amount)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryWallet {
    ledger: Ledger,
    purses: HashMap<String, MemoryPurse>,
}

impl MemoryWallet {
    pub fn new(ledger: &Ledger) -> Self {
        Self {
            ledger: ledger.clone(),
            purses: HashMap::new(),
        }
    }

    pub fn with_purse(mut self, petname: &str, initial: Amount) -> Self {
        let purse = self.ledger.open_purse(initial);
        self.purses.insert(petname.to_string(), purse);
        self
    }

    pub fn balance(&self, petname: &str) -> Option<u128> {
        self.purses
            .get(petname)
            .and_then(|purse| self.ledger.balance(&purse.id))
    }
}

impl Wallet for MemoryWallet {
    type Purse = MemoryPurse;

    async fn get_purse(&self, petname: &str) -> Result<MemoryPurse> {
        self.purses
            .get(petname)
            .cloned()
            .with_context(|| format!("no purse named {}", petname))
    }
}

#[derive(Debug, Clone)]
pub struct MemoryFaucet {
    fee_purse: MemoryPurse,
}

impl MemoryFaucet {
    pub fn new(ledger: &Ledger, initial: Amount) -> Self {
        Self {
            fee_purse: ledger.open_purse(initial),
        }
    }

    pub fn fee_balance(&self) -> u128 {
        self.fee_purse
            .ledger
            .balance(&self.fee_purse.id)
            .unwrap_or_default()
    }
}

impl Faucet for MemoryFaucet {
    type Purse = MemoryPurse;

    async fn get_fee_purse(&self) -> Result<MemoryPurse> {
        Ok(self.fee_purse.clone())
    }
}

/// Purse operation a [`FaultyPurse`] rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurseFault {
    Withdraw,
    Deposit,
}

/// Purse that reports a fixed balance and rejects one operation.
#[derive(Debug, Clone)]
pub struct FaultyPurse {
    balance: Amount,
    fault: Option<PurseFault>,
}

impl FaultyPurse {
    pub fn new(balance: Amount, fault: Option<PurseFault>) -> Self {
        Self { balance, fault }
    }
}

impl Purse for FaultyPurse {
    async fn get_current_amount(&self) -> Result<Amount> {
        Ok(self.balance.clone())
    }

    async fn withdraw(&self, _amount: &Amount) -> Result<Payment> {
        if self.fault == Some(PurseFault::Withdraw) {
            anyhow::bail!("withdraw rejected");
        }
        Ok(RemoteRef::new("payment:faulty"))
    }

    async fn deposit(&self, _payment: Payment) -> Result<Amount> {
        if self.fault == Some(PurseFault::Deposit) {
            anyhow::bail!("deposit rejected");
        }
        Ok(self.balance.clone())
    }
}

/// Wallet handing out the same [`FaultyPurse`] under every petname.
#[derive(Debug, Clone)]
pub struct FaultyWallet(pub FaultyPurse);

impl Wallet for FaultyWallet {
    type Purse = FaultyPurse;

    async fn get_purse(&self, _petname: &str) -> Result<FaultyPurse> {
        Ok(self.0.clone())
    }
}

/// Faucet whose fee purse is a [`FaultyPurse`].
#[derive(Debug, Clone)]
pub struct FaultyFaucet(pub FaultyPurse);

impl Faucet for FaultyFaucet {
    type Purse = FaultyPurse;

    async fn get_fee_purse(&self) -> Result<FaultyPurse> {
        Ok(self.0.clone())
    }
}
