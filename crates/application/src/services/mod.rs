mod message_service;
mod user_service;

#[cfg(test)]
mod user_service_tests;

pub use message_service::{MessageService, MessageServiceDependencies};
pub use user_service::{Credentials, UserChanges, UserService, UserServiceDependencies};
