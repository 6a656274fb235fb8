//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only ever see
//! domain ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, ProfileQuery, TodoCommand, TodoQuery, TokenCodec};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub todos: Arc<dyn TodoCommand>,
    pub todos_query: Arc<dyn TodoQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub profiles: Arc<dyn ProfileQuery>,
    /// Validates bearer tokens in the authentication extractor.
    pub tokens: Arc<dyn TokenCodec>,
}

impl HttpState {
    pub fn new(
        todos: Arc<dyn TodoCommand>,
        todos_query: Arc<dyn TodoQuery>,
        accounts: Arc<dyn AccountCommand>,
        profiles: Arc<dyn ProfileQuery>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            todos,
            todos_query,
            accounts,
            profiles,
            tokens,
        }
    }
}
