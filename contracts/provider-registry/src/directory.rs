//! Ordered, duplicate-free provider membership backing the registry.

use soroban_sdk::{contracttype, Address, Env, Vec};

/// Storage schema. Append-only across code replacements.
#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Providers,
}

/// Registered providers in insertion order.
pub fn providers(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Providers)
        .unwrap_or_else(|| Vec::new(env))
}

/// Append `id` unless it is already a member.
pub fn add(env: &Env, id: &Address) {
    let mut list = providers(env);
    if list.first_index_of(id.clone()).is_none() {
        list.push_back(id.clone());
        env.storage().instance().set(&DataKey::Providers, &list);
    }
}

/// Drop `id` if present, keeping the order of the remaining entries.
pub fn remove(env: &Env, id: &Address) {
    let mut list = providers(env);
    if let Some(pos) = list.first_index_of(id.clone()) {
        list.remove(pos);
        env.storage().instance().set(&DataKey::Providers, &list);
    }
}
