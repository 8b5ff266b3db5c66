//! Planner flags.
//!
//! Flags are explicit values handed to the planner and threaded down into
//! every solver. With the `std` feature they may also be read from the
//! environment:
//!
//! | Variable | Flag |
//! |----------|------|
//! | `RDFTPLAN_DESTROY_INPUT` | [`PlannerConfig::destroy_input`] |
//! | `RDFTPLAN_NO_VRECURSE` | [`PlannerConfig::no_vector_recursion`] |

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlannerConfig {
    /// Out-of-place plans may overwrite their input buffer.
    pub destroy_input: bool,
    /// Refuse to recurse over vector (batching) loops, reproducing the
    /// planning behaviour of the previous planner generation.
    pub no_vector_recursion: bool,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destroy_input(mut self, on: bool) -> Self {
        self.destroy_input = on;
        self
    }

    pub fn with_no_vector_recursion(mut self, on: bool) -> Self {
        self.no_vector_recursion = on;
        self
    }

    /// Read flags from `RDFTPLAN_*` environment variables. Unset variables
    /// keep their default.
    #[cfg(feature = "std")]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<alloc::string::String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_DESTROY_INPUT) {
            cfg.destroy_input = parse_flag(ENV_DESTROY_INPUT, &v)?;
        }
        if let Some(v) = lookup(ENV_NO_VRECURSE) {
            cfg.no_vector_recursion = parse_flag(ENV_NO_VRECURSE, &v)?;
        }
        Ok(cfg)
    }
}

pub const ENV_DESTROY_INPUT: &str = "RDFTPLAN_DESTROY_INPUT";
pub const ENV_NO_VRECURSE: &str = "RDFTPLAN_NO_VRECURSE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The named variable holds something other than a boolean flag.
    InvalidValue(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue(var) => write!(f, "{var} must be one of 1/0/true/false/yes/no"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        v if v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => Ok(true),
        v if v == "0" || v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("no") => {
            Ok(false)
        }
        _ => Err(ConfigError::InvalidValue(var)),
    }
}
