mod session;

pub use session::AuthStatus;
pub use session::SessionStore;
