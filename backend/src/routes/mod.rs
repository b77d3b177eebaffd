pub mod events;
pub mod lines;
pub mod positions;

pub const HEALTH: &str = "/health";
