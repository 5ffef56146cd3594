pub mod alert;
pub mod assessment;
pub mod config;
pub mod proctor;
pub mod roles;
pub mod types;

// Keep the public surface small and intentional.
pub use alert::*;
pub use assessment::*;
pub use config::*;
pub use proctor::*;
pub use roles::*;
pub use types::*;
