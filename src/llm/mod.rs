pub mod client;
pub mod credentials;
pub mod prompts;
#[cfg(test)]
pub mod scripted;

pub use client::*;
pub use credentials::*;
pub use prompts::*;
