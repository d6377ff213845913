//! Deposit ledger: per-depositee records plus the ordered index the
//! release sweep walks.

use soroban_sdk::{contracttype, Address, Env, Vec};

/// Storage schema. Variant order is append-only so replacement code keeps
/// reading the same entries.
#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Deposit(Address),
    Depositees,
    ProviderProportion,
    SessionDivisor,
    Endpoint,
    Token,
}

/// Funds held for a depositee until the lock window lapses.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Deposit {
    pub depositor: Address,
    pub amount: i128,
    pub locked_at: u64,
}

pub fn get(env: &Env, depositee: &Address) -> Option<Deposit> {
    env.storage()
        .persistent()
        .get(&DataKey::Deposit(depositee.clone()))
}

/// Store a deposit and index its depositee.
pub fn put(env: &Env, depositee: &Address, deposit: &Deposit) {
    env.storage()
        .persistent()
        .set(&DataKey::Deposit(depositee.clone()), deposit);

    let mut index = depositees(env);
    if index.first_index_of(depositee.clone()).is_none() {
        index.push_back(depositee.clone());
        env.storage().persistent().set(&DataKey::Depositees, &index);
    }
}

/// Drop a deposit and unindex its depositee, keeping the order of the
/// remaining entries.
pub fn remove(env: &Env, depositee: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Deposit(depositee.clone()));

    let mut index = depositees(env);
    if let Some(pos) = index.first_index_of(depositee.clone()) {
        index.remove(pos);
        env.storage().persistent().set(&DataKey::Depositees, &index);
    }
}

/// Depositees with a stored deposit, oldest first.
pub fn depositees(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Depositees)
        .unwrap_or_else(|| Vec::new(env))
}
