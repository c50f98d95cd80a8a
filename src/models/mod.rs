pub mod ideas;
pub mod outcome;
pub mod response;

pub use ideas::*;
pub use outcome::*;
pub use response::*;
