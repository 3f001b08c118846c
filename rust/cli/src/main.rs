fn main() {
    let filter = line98_cli::config::load()
        .map(|c| c.log)
        .unwrap_or_else(|_| "warn".to_string());
    if let Err(err) = line98_service::try_init_logging_with(&filter, false) {
        eprintln!("WARNING: logging disabled: {err}");
    }

    let code = line98_cli::run(
        std::env::args(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
