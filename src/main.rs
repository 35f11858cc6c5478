fn main() {
    if let Err(e) = hostpatch::cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
