//! talleres main entrypoint.

use env_logger::Env;
use talleres::run;

fn main() {
    env_logger::Builder::from_env(Env::new().filter_or("TALLERES_LOG", "warn")).init();

    println!();
    if let Err(e) = run() {
        talleres::ui::messages::error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
