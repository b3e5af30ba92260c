use std::process::ExitCode;

fn main() -> ExitCode {
    // Run the CLI
    docs_toc::cli::run()
}
