//! Environment snapshot capability
//!
//! Handlers never read the process environment directly; they are handed an
//! [`EnvironmentSource`] so tests can substitute a fixed table.

use std::collections::BTreeMap;

/// Name -> value table, ordered by name
pub type EnvSnapshot = BTreeMap<String, String>;

/// Something that can produce the current environment table on demand
pub trait EnvironmentSource: Send + Sync {
    fn snapshot(&self) -> EnvSnapshot;
}

/// Reads the operating system's environment at call time
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn snapshot(&self) -> EnvSnapshot {
        // vars() panics on non-UTF-8 entries, vars_os() does not
        std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }
}

/// A fixed table, mostly for tests
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Default, Clone)]
pub struct FixedEnvironment {
    vars: EnvSnapshot,
}

#[cfg_attr(not(test), allow(dead_code))]
impl FixedEnvironment {
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvironmentSource for FixedEnvironment {
    fn snapshot(&self) -> EnvSnapshot {
        self.vars.clone()
    }
}

/// Serialize a snapshot as a single JSON object
pub fn to_json(snapshot: &EnvSnapshot) -> String {
    // A map of strings always serializes
    serde_json::to_string(snapshot).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_environment_snapshot() {
        let env = FixedEnvironment::new([("FOO", "bar"), ("EMPTY", "")]);
        let snap = env.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get("FOO").map(String::as_str), Some("bar"));
        assert_eq!(snap.get("EMPTY").map(String::as_str), Some(""));
    }

    #[test]
    fn test_to_json_escapes_values() {
        let env = FixedEnvironment::new([("QUOTE", "say \"hi\"\n"), ("A", "1")]);
        let json = to_json(&env.snapshot());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["QUOTE"], "say \"hi\"\n");
        assert_eq!(parsed["A"], "1");
        assert!(json.starts_with(r#"{"A":"1""#), "keys are ordered: {json}");
    }

    #[test]
    fn test_empty_snapshot_is_empty_object() {
        assert_eq!(to_json(&FixedEnvironment::default().snapshot()), "{}");
    }

    #[test]
    fn test_process_environment_matches_os_table() {
        let snap = ProcessEnvironment.snapshot();
        let expected: EnvSnapshot = std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect();
        assert_eq!(snap, expected);
    }
}
