use ironwind::run_from_env;

fn main() {
    env_logger::init();
    if let Err(err) = run_from_env() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
