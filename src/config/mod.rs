//! Configuration module

mod site;

pub use site::Environment;
pub use site::GuideDoc;
pub use site::SiteConfig;
pub use site::ViewBackend;
pub use site::ViewsConfig;
pub use site::DEFAULT_TAGS;
