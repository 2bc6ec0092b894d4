fn main() {
    if let Err(e) = jsoncomplete::cli::run() {
        eprintln!("jsoncomplete: {}", e);
        std::process::exit(1);
    }
}
