#![allow(unused_imports)]
#![allow(dead_code)]
pub mod food_helpers;
pub mod test_db;

pub use food_helpers::*;
pub use test_db::*;
