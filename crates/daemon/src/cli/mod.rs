pub mod args;
pub mod input;
pub mod op;
pub mod ops;

pub use ops::{Health, Init, Key, Password, Version};
