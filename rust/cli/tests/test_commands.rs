use line98_cli::run;

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

fn value_after<'a>(output: &'a str, prefix: &str) -> &'a str {
    output
        .lines()
        .find_map(|l| l.strip_prefix(prefix))
        .unwrap_or_else(|| panic!("no line starting with {prefix:?} in {output}"))
}

#[test]
fn new_game_feeds_hint() {
    let (code, out, _) = run_cli(&["new", "--seed", "2024"]);
    assert_eq!(code, 0);
    let board = value_after(&out, "Board: ").to_string();
    let queue = value_after(&out, "Queue: ").to_string();

    let (code, out, err) = run_cli(&["hint", "--board", &board, "--next", &queue]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(value_after(&out, "Best: ").contains("->"));

    // same board, same answer
    let (_, again, _) = run_cli(&["hint", "--board", &board, "--next", &queue]);
    assert_eq!(out, again);
}

#[test]
fn hint_lists_candidates_with_all() {
    let mut board = "-".repeat(80);
    board.insert(40, 'Y');
    let (code, out, _) = run_cli(&["hint", "--board", &board, "--next", "RGB", "--all"]);
    assert_eq!(code, 0);
    assert_eq!(value_after(&out, "Candidates: "), "80");
}

#[test]
fn hint_with_bad_board_exits_2() {
    let (code, out, err) = run_cli(&["hint", "--board", "RRR", "--next", "RGB"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Expected 81 symbols, got 3"));

    let board = "x".repeat(81);
    let (code, _, err) = run_cli(&["hint", "--board", &board, "--next", "RGB"]);
    assert_eq!(code, 2);
    assert!(err.contains("position 0"));
}

#[test]
fn missing_required_flag_prints_usage() {
    let (code, out, err) = run_cli(&["stats"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("--input"));
    assert!(err.contains("For full help, run: line98 --help"));
}

#[test]
fn version_goes_to_stdout() {
    let (code, out, _) = run_cli(&["--version"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("line98 "));
}
