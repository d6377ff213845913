//! Provider Registry Contract for StellarBridge
//!
//! Owner-curated directory of the storage provider contracts a broker
//! hands out to clients. Registration order is preserved and membership
//! is duplicate-free.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, BytesN, Env, Symbol, Vec,
};

use ownable::AuthError;

mod directory;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContractError {
    AlreadyInitialized = 1,
    AccessDenied = 2,
    InvalidAccount = 3,
}

impl From<AuthError> for ContractError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AlreadyInitialized => ContractError::AlreadyInitialized,
            AuthError::AccessDenied => ContractError::AccessDenied,
            AuthError::InvalidAccount => ContractError::InvalidAccount,
        }
    }
}

/// Event symbols
const REGISTRY_INITIALIZED: Symbol = symbol_short!("reg_init");
const PROVIDER_ADDED: Symbol = symbol_short!("prov_add");
const PROVIDER_DELETED: Symbol = symbol_short!("prov_del");

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct ProviderRegistry;

#[contractimpl]
impl ProviderRegistry {
    /// Initialize the registry with its owner. The directory starts empty.
    pub fn initialize(env: Env, owner: Address) -> Result<(), ContractError> {
        ownable::bind_owner(&env, &owner)?;

        env.events().publish((REGISTRY_INITIALIZED,), (owner,));

        Ok(())
    }

    /// Register a provider contract (owner only).
    ///
    /// Re-adding an existing provider leaves the directory unchanged; the
    /// event is published either way.
    pub fn add_provider(env: Env, caller: Address, id: Address) -> Result<(), ContractError> {
        ownable::require_owner(&env, &caller)?;

        directory::add(&env, &id);

        env.events().publish((PROVIDER_ADDED,), (id,));

        Ok(())
    }

    /// Remove a provider contract (owner only).
    ///
    /// The event is published even when `id` was never registered, so
    /// observers see the removal intent either way.
    pub fn del_provider(env: Env, caller: Address, id: Address) -> Result<(), ContractError> {
        ownable::require_owner(&env, &caller)?;

        directory::remove(&env, &id);

        env.events().publish((PROVIDER_DELETED,), (id,));

        Ok(())
    }

    /// Registered providers in registration order.
    pub fn list_providers(env: Env) -> Vec<Address> {
        directory::providers(&env)
    }

    pub fn owner(env: Env) -> Option<Address> {
        ownable::owner(&env)
    }

    /// Hand the contract over to a new owner (owner only).
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        next: Address,
    ) -> Result<(), ContractError> {
        ownable::transfer_ownership(&env, &caller, &next)?;

        Ok(())
    }

    /// Replace the running contract code (owner only). Storage carries over.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        ownable::require_owner(&env, &caller)?;

        env.deployer().update_current_contract_wasm(new_wasm_hash);

        Ok(())
    }

    pub fn version() -> u32 {
        1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
