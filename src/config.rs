use std::env;
use std::time::Duration;

pub const DEFAULT_STATS_REFRESH_SECS: u64 = 30;
pub const DEFAULT_ACTIVITY_REFRESH_SECS: u64 = 30;
pub const DEFAULT_ATTENTION_REFRESH_SECS: u64 = 60;
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

/// Refresh cadences and feed size. Passed explicitly to the watch loop and
/// the feed formatter; nothing reads the environment after startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub stats_refresh: Duration,
    pub activity_refresh: Duration,
    pub attention_refresh: Duration,
    pub activity_limit: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            stats_refresh: Duration::from_secs(DEFAULT_STATS_REFRESH_SECS),
            activity_refresh: Duration::from_secs(DEFAULT_ACTIVITY_REFRESH_SECS),
            attention_refresh: Duration::from_secs(DEFAULT_ATTENTION_REFRESH_SECS),
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    // Unparseable or zero values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = ConsoleConfig::default();
        let secs = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };
        ConsoleConfig {
            stats_refresh: secs("CONSOLE_STATS_REFRESH_SECS", d.stats_refresh),
            activity_refresh: secs("CONSOLE_ACTIVITY_REFRESH_SECS", d.activity_refresh),
            attention_refresh: secs("CONSOLE_ATTENTION_REFRESH_SECS", d.attention_refresh),
            activity_limit: lookup("CONSOLE_ACTIVITY_LIMIT")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(d.activity_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_refresh_cadence() {
        let cfg = ConsoleConfig::from_lookup(|_| None);
        assert_eq!(cfg.stats_refresh, Duration::from_secs(30));
        assert_eq!(cfg.activity_refresh, Duration::from_secs(30));
        assert_eq!(cfg.attention_refresh, Duration::from_secs(60));
        assert_eq!(cfg.activity_limit, 10);
    }

    #[test]
    fn overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CONSOLE_STATS_REFRESH_SECS", "5"),
            ("CONSOLE_ATTENTION_REFRESH_SECS", "soon"),
            ("CONSOLE_ACTIVITY_REFRESH_SECS", "0"),
            ("CONSOLE_ACTIVITY_LIMIT", " 25 "),
        ]);
        let cfg = ConsoleConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.stats_refresh, Duration::from_secs(5));
        assert_eq!(cfg.attention_refresh, Duration::from_secs(60));
        assert_eq!(cfg.activity_refresh, Duration::from_secs(30));
        assert_eq!(cfg.activity_limit, 25);
    }
}
