pub mod food;
pub mod notification;
pub mod review;

pub use food::*;
pub use notification::*;
pub use review::*;
