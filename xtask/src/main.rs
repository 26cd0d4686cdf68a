use std::env;
use std::path::Path;
use std::process::{Command, ExitCode};

fn run(root: &Path, program: &str, args: &[&str]) -> Result<(), String> {
    let rendered = format!("{program} {}", args.join(" "));
    eprintln!("xtask: {rendered}");
    let status = Command::new(program)
        .args(args)
        .current_dir(root)
        .status()
        .map_err(|e| format!("failed to run `{rendered}`: {e}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("command failed: {rendered}"))
    }
}

fn ci(root: &Path) -> Result<(), String> {
    run(root, "cargo", &["fmt", "--all", "--", "--check"])?;
    run(
        root,
        "cargo",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )?;
    run(root, "cargo", &["test", "--workspace"])
}

fn main() -> ExitCode {
    let arg = env::args().nth(1).unwrap_or_else(|| "help".to_string());
    let Some(root) = Path::new(env!("CARGO_MANIFEST_DIR")).parent() else {
        eprintln!("failed to resolve workspace root");
        return ExitCode::FAILURE;
    };

    let result = match arg.as_str() {
        "ci" => ci(root),
        "bench" => run(root, "cargo", &["bench", "--workspace"]),
        "help" | "--help" | "-h" => {
            eprintln!("xtask commands:");
            eprintln!("  ci      fmt check, clippy and tests");
            eprintln!("  bench   criterion benchmarks");
            Ok(())
        }
        _ => Err(format!(
            "unknown xtask command: {arg} (try `cargo run -p xtask -- help`)"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
