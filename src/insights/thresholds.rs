//! Cut-offs for the insight and recommendation rules.

/// Success rate (percent) above which a location is doing well.
pub const SUCCESS_RATE_GOOD: f64 = 70.0;

/// Success rate (percent) above which a location is fair; at or below is poor.
pub const SUCCESS_RATE_FAIR: f64 = 40.0;

/// Average response (days) below which claims are handled quickly.
pub const RESPONSE_FAST_DAYS: f64 = 3.0;

/// Average response (days) at or above which claims are handled slowly.
pub const RESPONSE_SLOW_DAYS: f64 = 7.0;

/// Average response (days) above which streamlining verification is recommended.
pub const STREAMLINE_AFTER_DAYS: f64 = 5.0;
