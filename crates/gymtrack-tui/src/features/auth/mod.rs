//! Unauthenticated screens: sign-in and sign-up.

mod render;
pub mod sign_in;
pub mod sign_up;

pub use render::{render_sign_in, render_sign_up};
pub use sign_in::SignInState;
pub use sign_up::SignUpState;
