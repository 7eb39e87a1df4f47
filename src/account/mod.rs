pub mod password;
pub mod session;
pub mod users;

pub use session::{CurrentUser, MaybeUser, SessionRepository, SESSION_COOKIE};
pub use users::UserRepository;
