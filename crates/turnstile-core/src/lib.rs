pub mod error;
pub mod models;
pub mod password;
#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
pub mod token;
pub mod traits;

pub use error::AppError;
pub use models::{Claims, NewUser, User};
pub use password::PasswordHasher;
pub use token::TokenService;
pub use traits::UserStore;
