pub mod health;
pub mod init;
pub mod key;
pub mod password;
pub mod version;

pub use health::Health;
pub use init::Init;
pub use key::Key;
pub use password::Password;
pub use version::Version;
