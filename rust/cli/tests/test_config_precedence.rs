use line98_cli::run;
use serde_json::Value;
use serial_test::serial;

const VARS: &[&str] = &[
    "LINE98_CONFIG",
    "LINE98_SEED",
    "LINE98_ADVISOR",
    "LINE98_MAX_MOVES",
    "LINE98_LOG",
];

/// Clears every config variable on creation and again on drop.
struct CleanEnv;

impl CleanEnv {
    fn new() -> Self {
        clear();
        CleanEnv
    }

    fn set(&self, key: &str, value: &str) {
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

impl Drop for CleanEnv {
    fn drop(&mut self) {
        clear();
    }
}

fn clear() {
    for key in VARS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["line98"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn cfg() -> Value {
    let (code, out, err) = run_cli(&["cfg"]);
    assert_eq!(code, 0, "stderr: {err}");
    serde_json::from_str(&out).unwrap()
}

#[test]
#[serial]
fn defaults_when_nothing_is_set() {
    let _env = CleanEnv::new();
    let json = cfg();
    assert_eq!(json["seed"]["value"], Value::Null);
    assert_eq!(json["seed"]["source"], "default");
    assert_eq!(json["advisor"]["value"], "greedy");
    assert_eq!(json["max_moves"]["value"], 500);
    assert_eq!(json["log"]["source"], "default");
}

#[test]
#[serial]
fn env_overrides_file() {
    let env = CleanEnv::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("line98.toml");
    std::fs::write(&path, "seed = 456\nmax_moves = 40\nlog = \"debug\"\n").unwrap();
    env.set("LINE98_CONFIG", path.to_str().unwrap());

    let json = cfg();
    assert_eq!(json["seed"]["value"], 456);
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["max_moves"]["value"], 40);
    assert_eq!(json["advisor"]["source"], "default");

    env.set("LINE98_SEED", "7");
    env.set("LINE98_MAX_MOVES", "12");
    let json = cfg();
    assert_eq!(json["seed"]["value"], 7);
    assert_eq!(json["seed"]["source"], "env");
    assert_eq!(json["max_moves"]["value"], 12);
    assert_eq!(json["max_moves"]["source"], "env");
    assert_eq!(json["log"]["value"], "debug");
    assert_eq!(json["log"]["source"], "file");
}

#[test]
#[serial]
fn flag_overrides_env() {
    let env = CleanEnv::new();
    env.set("LINE98_SEED", "9");

    let (code, out, _) = run_cli(&["new"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Seed: 9\n"));

    let (code, out, _) = run_cli(&["new", "--seed", "5"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Seed: 5\n"));
}

#[test]
#[serial]
fn invalid_values_fail_with_exit_2() {
    let env = CleanEnv::new();
    env.set("LINE98_SEED", "abc");
    let (code, _, err) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("Invalid LINE98_SEED"));

    clear();
    env.set("LINE98_ADVISOR", "oracle");
    let (code, _, err) = run_cli(&["new", "--seed", "1"]);
    assert_eq!(code, 2);
    assert!(err.contains("oracle"));
}

#[test]
#[serial]
fn unreadable_config_file_is_an_error() {
    let env = CleanEnv::new();
    env.set("LINE98_CONFIG", "/nonexistent/line98.toml");
    let (code, _, err) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("cannot read config file"));
}
