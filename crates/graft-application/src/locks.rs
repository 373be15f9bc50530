//! Lock helpers that turn poisoning into domain errors

use std::sync::{Mutex, MutexGuard};

use graft_domain::{Error, Result};

/// Lock a Mutex and handle poisoning
pub fn lock_mutex<'a, T>(lock: &'a Mutex<T>, context: &str) -> Result<MutexGuard<'a, T>> {
    lock.lock()
        .map_err(|_| Error::internal(format!("Mutex lock poisoned: {context}")))
}
