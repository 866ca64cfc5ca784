use soroban_sdk::{contracttype, symbol_short, BytesN, Env, Symbol};

use crate::{ttl, CommonError};

const PAUSED: Symbol = symbol_short!("PAUSED");

/// Which halt switch a pause operation targets.
///
/// The global flag lives in instance storage; each scoped flag lives in
/// persistent storage under `("PAUSED", scope_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    Global,
    Scoped(BytesN<32>),
}

fn scoped_key(scope_id: &BytesN<32>) -> (Symbol, BytesN<32>) {
    (PAUSED, scope_id.clone())
}

/// Sets the pause flag for `scope` and returns `true` if the stored value
/// changed.
///
/// Callers are responsible for enforcing admin authorization before invoking
/// this function. The module itself does **not** perform auth checks.
pub fn set_paused(env: &Env, scope: &PauseScope, paused: bool) -> bool {
    if is_paused(env, scope) == paused {
        return false;
    }
    match scope {
        PauseScope::Global => {
            env.storage().instance().set(&PAUSED, &paused);
            ttl::extend_instance(env);
        }
        PauseScope::Scoped(id) => {
            let key = scoped_key(id);
            if paused {
                env.storage().persistent().set(&key, &true);
                ttl::extend_persistent(env, &key);
            } else {
                env.storage().persistent().remove(&key);
            }
        }
    }
    true
}

/// Returns the raw value of a single flag, ignoring every other scope.
pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    match scope {
        PauseScope::Global => env.storage().instance().get(&PAUSED).unwrap_or(false),
        PauseScope::Scoped(id) => env
            .storage()
            .persistent()
            .get(&scoped_key(id))
            .unwrap_or(false),
    }
}

/// Effective pause for `scope_id`: the global flag OR the scope's own flag.
pub fn is_effectively_paused(env: &Env, scope_id: &BytesN<32>) -> bool {
    is_paused(env, &PauseScope::Global) || is_paused(env, &PauseScope::Scoped(scope_id.clone()))
}

/// Returns `CommonError::Paused` when the operation's scope is halted.
///
/// A `Global` scope only consults the global flag; a `Scoped` scope consults
/// both. Place this at the top of every state-mutating function that must
/// honour the pause. View-only functions should **not** call this.
pub fn require_not_paused(env: &Env, scope: &PauseScope) -> Result<(), CommonError> {
    let halted = match scope {
        PauseScope::Global => is_paused(env, scope),
        PauseScope::Scoped(id) => is_effectively_paused(env, id),
    };
    if halted {
        return Err(CommonError::Paused);
    }
    Ok(())
}
