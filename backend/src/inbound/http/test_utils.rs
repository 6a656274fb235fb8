//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use mockable::DefaultClock;

use super::state::HttpState;
use crate::domain::EmailAddress;
use crate::domain::UserId;
use crate::domain::ports::{
    MockAccountCommand, MockProfileQuery, MockTodoCommand, MockTodoQuery, TokenCodec,
};
use crate::outbound::credentials::JwtTokenCodec;

const TEST_SECRET: &str = "http-test-secret";

/// Mocked driving ports; set expectations, then call [`TestPorts::into_state`].
///
/// Tokens are real HS256 tokens signed with a fixed test secret.
#[derive(Default)]
pub(crate) struct TestPorts {
    pub todos: MockTodoCommand,
    pub todos_query: MockTodoQuery,
    pub accounts: MockAccountCommand,
    pub profiles: MockProfileQuery,
}

impl TestPorts {
    pub(crate) fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.todos),
            Arc::new(self.todos_query),
            Arc::new(self.accounts),
            Arc::new(self.profiles),
            Arc::new(token_codec()),
        )
    }
}

fn token_codec() -> JwtTokenCodec {
    JwtTokenCodec::new(TEST_SECRET, Arc::new(DefaultClock))
}

/// `Authorization` header value for `user_id`.
pub(crate) fn bearer_header(user_id: &UserId) -> String {
    let email = EmailAddress::new("ada@example.com").expect("fixture email");
    let token = token_codec()
        .issue(user_id, &email)
        .expect("fixture token signs");
    format!("Bearer {}", token.as_str())
}
