pub type Float = f64;

//SI units throughout: kg, m, s.
pub const G: Float = 6.674e-11;
pub const SECONDS_PER_DAY: Float = 86_400.;
pub const SECONDS_PER_HOUR: Float = 3_600.;

