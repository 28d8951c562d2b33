fn main() {
    if let Err(error) = rowtree_cli::run() {
        // run() installs the subscriber right after parsing arguments.
        tracing::error!(%error, "CLI execution failed");
        std::process::exit(1);
    }
}
