pub mod errors;
pub mod notifications;

pub use errors::{ConfigError, PortalError};
pub use notifications::{
    Notification, NotificationKind, NotificationQueue, NotificationSink, TracingSink,
};

pub type Result<T> = std::result::Result<T, PortalError>;
