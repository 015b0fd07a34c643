//! Authentication types and session management.
//!
//! Every API operation goes through a [`Session`]. All of them except
//! [`Session::authorize`] are gated on the session holding a token; see
//! [`gate`] for the check itself.

mod credentials;
pub mod gate;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use gate::AuthState;
pub use session::{Session, SessionBuilder};
pub use tokens::AccessToken;
