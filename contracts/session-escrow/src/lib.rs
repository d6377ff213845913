//! Session Escrow Contract for StellarBridge
//!
//! Holds session funds deposited on behalf of storage providers. Each
//! depositee carries at most one live deposit; once the lock window
//! lapses, anyone may release the funds back to their depositor.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, BytesN, Env, String,
    Symbol, Vec,
};

use ownable::AuthError;

mod ledger;

use ledger::DataKey;
pub use ledger::Deposit;

/// Seconds a deposit stays locked once taken.
pub const DEPOSIT_TTL: u64 = 5;

/// Default broker endpoint reported to clients.
const DEFAULT_ENDPOINT: &str = "https://broker.staging.stellarbridge.dev";

/// Default provider share of a session fee, in basis points.
const DEFAULT_PROVIDER_PROPORTION: u32 = 0;

/// Default session fee divisor, in stroops (100 XLM).
const DEFAULT_SESSION_DIVISOR: i128 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContractError {
    AlreadyInitialized = 1,
    AccessDenied = 2,
    InvalidAccount = 3,
    InvalidAmount = 4,
    DuplicateDeposit = 5,
    TransferFailure = 6,
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
const ESCROW_INITIALIZED: Symbol = symbol_short!("esc_init");
const DEPOSIT_ADDED: Symbol = symbol_short!("dep_add");
const DEPOSIT_RELEASED: Symbol = symbol_short!("dep_rel");

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct SessionEscrow;

#[contractimpl]
impl SessionEscrow {
    /// Initialize the escrow with its owner and the deposit token.
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), ContractError> {
        ownable::bind_owner(&env, &owner)?;

        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::ProviderProportion, &DEFAULT_PROVIDER_PROPORTION);
        env.storage()
            .instance()
            .set(&DataKey::SessionDivisor, &DEFAULT_SESSION_DIVISOR);
        env.storage().instance().set(
            &DataKey::Endpoint,
            &String::from_str(&env, DEFAULT_ENDPOINT),
        );

        env.events()
            .publish((ESCROW_INITIALIZED,), (owner, token));

        Ok(())
    }

    /// Lock `amount` of the deposit token for `depositee`.
    ///
    /// Funds are pulled from `depositor`, who must authorize the call. A
    /// depositee carries at most one live deposit: a still-locked one
    /// rejects the call before any transfer is taken, an expired one is
    /// released back to its depositor first, within the same call.
    pub fn deposit(
        env: Env,
        depositor: Address,
        depositee: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        depositor.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        if let Some(existing) = ledger::get(&env, &depositee) {
            if !Self::is_expired(&env, &existing) {
                return Err(ContractError::DuplicateDeposit);
            }
            Self::release_deposit(&env, &depositee, &existing)?;
        }

        let token_client = token::Client::new(&env, &Self::token_address(&env)?);
        token_client.transfer(&depositor, &env.current_contract_address(), &amount);

        let record = Deposit {
            depositor: depositor.clone(),
            amount,
            locked_at: env.ledger().timestamp(),
        };
        ledger::put(&env, &depositee, &record);

        env.events()
            .publish((DEPOSIT_ADDED,), (depositor, depositee, amount));

        Ok(())
    }

    /// Release the deposit held for `depositee` if its lock has lapsed.
    ///
    /// Anyone can call this. An absent or still-locked deposit is left
    /// untouched and no event is published.
    pub fn release(env: Env, depositee: Address) -> Result<(), ContractError> {
        if let Some(deposit) = ledger::get(&env, &depositee) {
            if Self::is_expired(&env, &deposit) {
                Self::release_deposit(&env, &depositee, &deposit)?;
            }
        }

        Ok(())
    }

    /// Release every expired deposit in one sweep.
    ///
    /// A refund that cannot complete fails the whole call, so no deposit
    /// is ever partially released.
    pub fn release_all(env: Env) -> Result<(), ContractError> {
        for depositee in ledger::depositees(&env).iter() {
            if let Some(deposit) = ledger::get(&env, &depositee) {
                if Self::is_expired(&env, &deposit) {
                    Self::release_deposit(&env, &depositee, &deposit)?;
                }
            }
        }

        Ok(())
    }

    /// Whether `depositee` currently holds an unexpired deposit.
    pub fn is_locked(env: Env, depositee: Address) -> bool {
        match ledger::get(&env, &depositee) {
            Some(deposit) => !Self::is_expired(&env, &deposit),
            None => false,
        }
    }

    /// The deposit currently stored for `depositee`, expired or not.
    pub fn get_deposit(env: Env, depositee: Address) -> Option<Deposit> {
        ledger::get(&env, &depositee)
    }

    /// Depositees with a stored deposit, oldest first.
    pub fn list_depositees(env: Env) -> Vec<Address> {
        ledger::depositees(&env)
    }

    /// Update the broker endpoint (owner only).
    pub fn set_endpoint(env: Env, caller: Address, endpoint: String) -> Result<(), ContractError> {
        ownable::require_owner(&env, &caller)?;

        env.storage().instance().set(&DataKey::Endpoint, &endpoint);

        Ok(())
    }

    /// Update the provider fee share in basis points (owner only).
    pub fn set_provider_proportion(
        env: Env,
        caller: Address,
        proportion: u32,
    ) -> Result<(), ContractError> {
        ownable::require_owner(&env, &caller)?;

        env.storage()
            .instance()
            .set(&DataKey::ProviderProportion, &proportion);

        Ok(())
    }

    /// Update the session fee divisor (owner only).
    pub fn set_session_divisor(
        env: Env,
        caller: Address,
        divisor: i128,
    ) -> Result<(), ContractError> {
        ownable::require_owner(&env, &caller)?;

        env.storage()
            .instance()
            .set(&DataKey::SessionDivisor, &divisor);

        Ok(())
    }

    /// Current broker endpoint.
    pub fn endpoint(env: Env) -> String {
        env.storage()
            .instance()
            .get(&DataKey::Endpoint)
            .unwrap_or_else(|| String::from_str(&env, DEFAULT_ENDPOINT))
    }

    /// Current provider fee share in basis points.
    pub fn provider_proportion(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::ProviderProportion)
            .unwrap_or(DEFAULT_PROVIDER_PROPORTION)
    }

    /// Current session fee divisor.
    pub fn session_divisor(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::SessionDivisor)
            .unwrap_or(DEFAULT_SESSION_DIVISOR)
    }

    pub fn owner(env: Env) -> Option<Address> {
        ownable::owner(&env)
    }

    /// The token deposits are denominated in.
    pub fn token(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Token)
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

    /// Replace the running contract code (owner only). Storage carries
    /// over; the schema in `ledger` is append-only for that reason.
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

    // Helper functions

    fn token_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(ContractError::AccessDenied)
    }

    fn is_expired(env: &Env, deposit: &Deposit) -> bool {
        env.ledger().timestamp() - deposit.locked_at >= DEPOSIT_TTL
    }

    /// Remove the record, refund the depositor, publish the release. The
    /// ledger is updated before the transfer goes out.
    fn release_deposit(
        env: &Env,
        depositee: &Address,
        deposit: &Deposit,
    ) -> Result<(), ContractError> {
        ledger::remove(env, depositee);

        let token_client = token::Client::new(env, &Self::token_address(env)?);
        if token_client
            .try_transfer(
                &env.current_contract_address(),
                &deposit.depositor,
                &deposit.amount,
            )
            .is_err()
        {
            return Err(ContractError::TransferFailure);
        }

        env.events()
            .publish((DEPOSIT_RELEASED,), (depositee.clone(), deposit.amount));

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
