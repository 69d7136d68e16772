// Types shared by the session store and the sign-in client
pub mod common;

mod client;
mod error;

pub use client::{
    authenticate, sign_out, validate_credentials, Credentials, SessionStore, Settings,
    SignInClient,
};
pub use common::Session;
pub use error::AuthError;
