//! # OAuth Module
//!
//! The OAuth 2.0 authorization-code flow, shared by every provider:
//!
//! 1. **State**: a random value is issued per login attempt
//!    ([`crate::management::SessionStore::begin_authorization`])
//! 2. **Redirect**: the browser is sent to [`authorization_url`]
//! 3. **Callback**: the provider returns `code` and `state`; the state is checked
//!    against the pending attempt and the browser cookie
//! 4. **Exchange**: [`exchange_code`] trades the code for a bearer token
//!
//! Per-provider differences (endpoints, scope, credential placement) live in
//! [`crate::provider::ProviderConfig`], so there is a single code path.

mod authorize;
mod exchange;

pub use authorize::authorization_url;
pub use exchange::exchange_code;
