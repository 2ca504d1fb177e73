pub mod chat_service;
pub mod expiry_scanner;
pub mod food_service;
pub mod mail_service;
pub mod notification_service;
pub mod review_service;

pub use chat_service::*;
pub use expiry_scanner::*;
pub use food_service::*;
pub use mail_service::*;
pub use notification_service::*;
pub use review_service::*;
