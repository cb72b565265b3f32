pub mod config;
pub mod error;
pub mod paths;
pub mod profile;
pub mod provision;
pub mod render;
pub mod scaffold;
pub mod server;
pub mod templates;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, ScaffoldError};
pub use profile::Profile;
pub use scaffold::{Options, Plan, ScaffoldReport, Scaffolder};
