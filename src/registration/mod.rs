//! User registration: signup flow and user stores

pub mod error;
pub mod memory_store;
pub mod request;
pub mod signup;
pub mod store;
pub mod user_data;
pub mod user_directory;
pub mod user_record;

pub use error::{SignupError, StoreError};
pub use memory_store::MemoryUserStore;
pub use request::SignupRequest;
pub use signup::{SignupHandler, SignupStage};
pub use store::UserStore;
pub use user_data::{UserCredentials, UserData, UserPreferences};
pub use user_directory::UserDirectory;
pub use user_record::{UserMetadata, UserRecord};
