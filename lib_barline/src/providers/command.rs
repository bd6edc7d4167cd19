//! # External Commands
//!
//! The one place providers shell out from.

use std::process::Command;

use crate::core::generator::GenerationError;

/// # Run Command
///
/// Runs `program` with `args` and waits for it to finish.
///
/// # Returns
/// The trimmed stdout on success. A non-zero exit maps to
/// `GenerationError::Command` carrying the trimmed stderr, and a program that
/// cannot be started maps to `GenerationError::Execution`.
pub fn run_command(program: &str, args: &[&str]) -> Result<String, GenerationError> {
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(e) => {
            return Err(GenerationError::Execution(format!(
                "{} {}: {}",
                program,
                args.join(" "),
                e
            )));
        }
    };

    if !output.status.success() {
        return Err(GenerationError::Command {
            program: program.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr: std::str::from_utf8(&output.stderr)?.trim().to_string(),
        });
    }

    Ok(std::str::from_utf8(&output.stdout)?.trim().to_string())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_trimmed_stdout() {
        let out = run_command("sh", &["-c", "printf '  hello \\n\\n'"]).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let err = run_command("sh", &["-c", "echo 'No players found' >&2; exit 1"]).unwrap_err();
        match err {
            GenerationError::Command {
                program,
                status,
                stderr,
            } => {
                assert_eq!(program, "sh");
                assert_eq!(status, 1);
                assert_eq!(stderr, "No players found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_an_execution_error() {
        let err = run_command("definitely-not-a-real-program-4242", &[]).unwrap_err();
        assert!(matches!(err, GenerationError::Execution(_)));
    }
}
