pub mod candidate;
pub mod location;
pub mod time;

pub use candidate::*;
pub use location::*;
pub use time::*;
