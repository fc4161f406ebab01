fn main() {
    if let Err(e) = biopatch_chat::run() {
        tracing::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
