use soroban_sdk::{Env, IntoVal, Val};

/// Remaining TTL (in ledgers) below which a persistent entry is bumped. ~30 days.
pub const TTL_THRESHOLD: u32 = 518_400;
/// TTL (in ledgers) a bumped persistent entry is extended to. ~180 days.
pub const TTL_EXTEND_TO: u32 = 3_110_400;

/// Extends the TTL of an existing persistent entry.
///
/// Must be called after the entry has been written; extending a missing key
/// traps the host.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of the contract instance and the counters stored with it.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
