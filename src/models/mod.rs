pub mod analysis;
pub mod config;
pub mod issue;

pub use analysis::*;
pub use config::*;
pub use issue::*;
