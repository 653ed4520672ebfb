#![forbid(unsafe_code)]

fn main() -> std::process::ExitCode {
    telerisk_cli::main_entry()
}
