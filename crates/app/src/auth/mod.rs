//! Authentication

mod errors;
mod models;
pub mod openbao;
pub mod password;
mod repository;
mod service;
mod token;
mod verifier;

pub use errors::*;
pub use models::*;
pub use openbao::{OpenBaoClient, OpenBaoConfig, OpenBaoError};
pub use password::{BCRYPT_COST, PasswordError, hash_password, verify_password};
pub use service::*;
pub use token::*;
pub use verifier::*;
