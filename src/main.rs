use navdeck::cli;

fn main() {
    // Logging is initialized inside `process_cli` once the --log-level flag
    // is known.
    let code = cli::process_cli();
    log::logger().flush();
    std::process::exit(code);
}
