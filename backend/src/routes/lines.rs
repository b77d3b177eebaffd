/// Field lines derived from GONG magnetograms, nearest to `{date}`.
pub const GET_GONG_FIELD_LINES: &str = "/lines/gong/{date}";
/// Generic precomputed field lines, nearest to `{date}`.
pub const GET_FIELD_LINES: &str = "/lines/{date}";
