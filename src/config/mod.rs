//! Configuration module

mod site;

pub use site::CalendarConfig;
pub use site::FeedsConfig;
pub use site::SiteConfig;
pub use site::TagConfig;
