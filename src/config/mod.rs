//! Configuration module

mod site;

pub use site::Environment;
pub use site::GitConfig;
pub use site::SiteConfig;
