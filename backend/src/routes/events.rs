/// HEK events in a time range.
pub const GET_EVENTS: &str = "/event";

pub const EVENTS_PARAMS: &[&str] = &["start", "end"];
