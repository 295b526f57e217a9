fn main() {
    if let Err(err) = swimlane::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
