// External crates
use env_logger::Env;

// Import functions
use problem_xml::parse_args;
use problem_xml::run;

/// Entry point of the program.
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let matches = parse_args();
    if let Err(e) = run(matches) {
        eprintln!("[problem-xml] Error: {}", e);
        std::process::exit(1);
    }
}
