//! The four standard behaviors, in pipeline order

mod exception;
mod logging;
mod notification;
mod validation;

pub use exception::ExceptionBehavior;
pub use logging::LoggingBehavior;
pub use notification::NotificationBehavior;
pub use validation::ValidationBehavior;
