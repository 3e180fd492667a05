//! Application state shared across request handlers

use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::store::{AccountStore, IssueStore, SessionStore};

/// Shared application state, generic over the store and notifier
/// implementations so tests can swap in in-memory doubles.
pub struct AppState<A, I, S, N> {
    pub accounts: Arc<A>,
    pub issues: Arc<I>,
    pub sessions: Arc<S>,
    pub notifier: N,
    pub config: Config,
}

impl<A, I, S, N> AppState<A, I, S, N>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    pub fn new(
        accounts: Arc<A>,
        issues: Arc<I>,
        sessions: Arc<S>,
        notifier: N,
        config: Config,
    ) -> Self {
        Self {
            accounts,
            issues,
            sessions,
            notifier,
            config,
        }
    }
}
