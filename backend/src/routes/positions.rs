pub const GET_PSP_POSITION: &str = "/psp";
pub const GET_EVENT_POSITION: &str = "/event/position";
pub const GET_OBSERVER_POSITION: &str = "/observer/position";
pub const GET_EARTH_POSITION: &str = "/earth/{date}";

pub const PSP_PARAMS: &[&str] = &["start", "end"];
pub const EVENT_POSITION_PARAMS: &[&str] = &["system", "coord1", "coord2", "date", "observatory", "units"];
/// Optional third coordinate for event positions.
pub const EVENT_POSITION_COORD3: &str = "coord3";
pub const OBSERVER_POSITION_PARAMS: &[&str] = &["id"];
