use std::env;
use std::process::Command;
use std::string::String;

/// Options shared by the cargo commands xtask spawns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
    pub rustflags: Option<String>,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }
}

/// Read the build configuration from the environment.
///
/// `RDFTPLAN_FEATURES` adds crate features; `RDFTPLAN_NATIVE=1` compiles
/// benchmarks for the host CPU.
pub fn detect_config() -> BuildConfig {
    let extra = env::var("RDFTPLAN_FEATURES").unwrap_or_default();
    let native = env::var("RDFTPLAN_NATIVE")
        .map(|v| v.trim() == "1")
        .unwrap_or(false);
    compute_config(&extra, native)
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(extra: &str, native: bool) -> BuildConfig {
    let mut features: Vec<String> = Vec::new();
    for feat in extra.split([' ', ',']) {
        let feat = feat.trim();
        if !feat.is_empty() && !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }
    BuildConfig {
        features,
        rustflags: native.then(|| "-C target-cpu=native".to_string()),
    }
}

fn with_features(mut cmd: Command, cfg: &BuildConfig) -> Command {
    if let Some(f) = cfg.features_arg() {
        cmd.arg("--features").arg(f);
    }
    cmd
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");
    with_features(cmd, cfg)
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("test");
    with_features(cmd, cfg)
}

/// Build the library without `std` to keep the `no_std` path honest.
pub fn no_std_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--lib", "--no-default-features"]);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["clippy", "--all-targets", "--all-features"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    cmd
}

/// Run the plan-tree demo with planner decisions logged.
pub fn demo_command(n: usize) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.env("RUST_LOG", "rdftplan=debug");
    cmd.args([
        "run",
        "--example",
        "plan_tree",
        "--features",
        "verbose-logging",
        "--",
    ]);
    cmd.arg(n.to_string());
    cmd
}

pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    if let Some(rf) = &cfg.rustflags {
        cmd.env("RUSTFLAGS", rf);
    }
    cmd.args(["bench", "--manifest-path", "rdftplan-bench/Cargo.toml"]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_compute_features_dedup() {
        let cfg = compute_config("std verbose-logging,std", false);
        assert_eq!(cfg.features, vec!["std", "verbose-logging"]);
        assert!(cfg.rustflags.is_none());
    }

    #[test]
    fn test_compute_native() {
        let cfg = compute_config("", true);
        assert!(cfg.features.is_empty());
        assert_eq!(cfg.features_arg(), None);
        assert_eq!(cfg.rustflags.as_deref(), Some("-C target-cpu=native"));
    }

    #[test]
    fn test_commands_include_features() {
        let cfg = compute_config("verbose-logging", false);
        let a = args(&build_command(&cfg));
        assert!(a.contains(&"build".to_string()));
        assert!(a.contains(&"--features".to_string()));
        assert!(a.contains(&"verbose-logging".to_string()));
        let t = args(&test_command(&cfg));
        assert_eq!(t[0], "test");
    }

    #[test]
    fn test_bench_env() {
        let cfg = compute_config("", true);
        let cmd = bench_command(&cfg);
        let envs: Vec<_> = cmd
            .get_envs()
            .map(|(k, v)| {
                (
                    k.to_str().unwrap().to_string(),
                    v.unwrap().to_str().unwrap().to_string(),
                )
            })
            .collect();
        assert!(envs
            .iter()
            .any(|(k, v)| k == "RUSTFLAGS" && v.contains("native")));
        assert!(args(&cmd).contains(&"rdftplan-bench/Cargo.toml".to_string()));
    }

    #[test]
    fn test_other_commands() {
        assert!(no_std_command().get_args().any(|a| a == "--no-default-features"));
        assert!(clippy_command().get_args().any(|a| a == "clippy"));
        assert!(fmt_command().get_args().any(|a| a == "fmt"));
        let demo = args(&demo_command(24));
        assert!(demo.contains(&"plan_tree".to_string()));
        assert_eq!(demo.last().map(String::as_str), Some("24"));
    }
}
