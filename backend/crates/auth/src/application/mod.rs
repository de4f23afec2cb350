//! Application Layer
//!
//! Use cases orchestrating the domain: registration, sign-in, sign-out,
//! session checking, and password update.

pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;
pub mod update_password;

pub use check_session::CheckSessionUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use update_password::{UpdatePasswordInput, UpdatePasswordUseCase};
