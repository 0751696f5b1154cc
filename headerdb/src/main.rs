use headerdb_core::info;
use headerdb_lib::{args::parse_args, daemon::run};

pub fn main() {
    let args = parse_args();
    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    info!("headerdb has stopped...");
}
