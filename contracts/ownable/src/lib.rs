//! Single-owner guard shared by the StellarBridge contracts.
//!
//! Stores the owner under one instance key and funnels every privileged
//! call through the same authenticate-then-compare check, so ownership
//! behaves identically in the escrow and the registry.

#![no_std]

use soroban_sdk::{contracterror, symbol_short, Address, Env, Symbol};

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthError {
    AlreadyInitialized = 1,
    AccessDenied = 2,
    InvalidAccount = 3,
}

const OWNER: Symbol = symbol_short!("owner");

/// Event symbol for an ownership handover.
pub const OWNERSHIP_TRANSFERRED: Symbol = symbol_short!("own_xfer");

/// Bind the initial owner. Fails once an owner is set.
pub fn bind_owner(env: &Env, owner: &Address) -> Result<(), AuthError> {
    if env.storage().instance().has(&OWNER) {
        return Err(AuthError::AlreadyInitialized);
    }

    env.storage().instance().set(&OWNER, owner);

    Ok(())
}

/// Current owner, if one has been bound.
pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Authenticate `caller` and check that it is the bound owner.
///
/// Fails while no owner is bound, so gated operations stay closed on an
/// uninitialized contract.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), AuthError> {
    caller.require_auth();

    match owner(env) {
        Some(current) if current == *caller => Ok(()),
        _ => Err(AuthError::AccessDenied),
    }
}

/// Hand ownership to `next` (owner only).
///
/// The contract's own address is rejected: nothing can authorize calls
/// for it, so binding it would strand every gated operation.
pub fn transfer_ownership(env: &Env, caller: &Address, next: &Address) -> Result<(), AuthError> {
    require_owner(env, caller)?;

    if *next == env.current_contract_address() {
        return Err(AuthError::InvalidAccount);
    }

    env.storage().instance().set(&OWNER, next);

    env.events()
        .publish((OWNERSHIP_TRANSFERRED,), (caller.clone(), next.clone()));

    Ok(())
}
