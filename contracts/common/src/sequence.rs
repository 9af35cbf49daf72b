use soroban_sdk::{Env, Symbol};

use crate::ttl::extend_instance;

/// Allocate and return the next id for `counter` (1-based, monotonically increasing).
/// Also bumps the instance TTL so the counters outlive idle periods.
pub fn next_id(env: &Env, counter: &Symbol) -> u64 {
    let next = current_id(env, counter).saturating_add(1);
    env.storage().instance().set(counter, &next);
    extend_instance(env);
    next
}

/// The last id handed out for `counter`, or 0 when none has been allocated.
pub fn current_id(env: &Env, counter: &Symbol) -> u64 {
    env.storage().instance().get(counter).unwrap_or(0u64)
}
