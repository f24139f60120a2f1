fn is_robot_mode_args() -> bool {
    std::env::args().any(|arg| arg == "--json" || arg == "--robot")
}

fn report(err: &gallery_select::CliError) -> ! {
    if err.code == 0 {
        // --help / --version
        print!("{}", err.message);
    } else if is_robot_mode_args() {
        eprintln!("{}", err.to_json());
    } else {
        eprintln!("{}", err.message.trim_end());
        if let Some(hint) = &err.hint {
            eprintln!("hint: {hint}");
        }
    }
    std::process::exit(err.code);
}

fn main() {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();
    gallery_select::init_tracing();

    let raw_args: Vec<String> = std::env::args().collect();
    let parsed = match gallery_select::parse_cli(raw_args) {
        Ok(parsed) => parsed,
        Err(err) => report(&err),
    };

    if let Err(err) = gallery_select::run_with_parsed(parsed) {
        report(&err);
    }
}
