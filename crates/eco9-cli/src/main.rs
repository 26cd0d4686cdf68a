#![forbid(unsafe_code)]

fn main() -> std::process::ExitCode {
    eco9_cli::main_entry()
}
