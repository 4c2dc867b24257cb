use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ProbeError;

const WAIT_POLL: Duration = Duration::from_millis(25);

/// Run an external inspection command and capture its stdout as trimmed
/// text.
///
/// stdout is drained on a dedicated thread while the child is polled
/// against a deadline, so neither a hung utility nor one emitting more than
/// a pipe buffer can stall a probe wave. On timeout the child is killed and
/// reaped.
pub fn run_command(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<String, ProbeError> {
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ProbeError::Launch {
            command: program.to_string(),
            source,
        })?;

    let stdout = child.stdout.take();
    let reader = thread::spawn(move || -> io::Result<String> {
        let mut text = String::new();
        if let Some(mut stdout) = stdout {
            stdout.read_to_string(&mut text)?;
        }
        Ok(text)
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    kill_and_reap(&mut child);
                    let _ = reader.join();
                    return Err(ProbeError::Timeout {
                        command: program.to_string(),
                        limit: timeout,
                    });
                }
                thread::sleep(WAIT_POLL);
            }
            Err(source) => {
                kill_and_reap(&mut child);
                let _ = reader.join();
                return Err(ProbeError::Wait {
                    command: program.to_string(),
                    source,
                });
            }
        }
    };

    if !status.success() {
        let _ = reader.join();
        return Err(ProbeError::Exit {
            command: program.to_string(),
            code: status.code(),
        });
    }

    let text = match reader.join() {
        Ok(Ok(text)) => text,
        Ok(Err(source)) => {
            return Err(ProbeError::Wait {
                command: program.to_string(),
                source,
            });
        }
        Err(_) => String::new(),
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ProbeError::NoOutput {
            command: program.to_string(),
        });
    }

    Ok(text.to_string())
}

/// Make sure a child that will not be waited on normally does not linger.
fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_trimmed_output() {
        let out = run_command("echo", &["  hello  "], Duration::from_secs(5)).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_output_larger_than_a_pipe_buffer_is_not_a_timeout() {
        let out = run_command(
            "sh",
            &["-c", "yes x | head -n 100000"],
            Duration::from_secs(10),
        )
        .unwrap();
        // 100000 "x\n" lines, trailing newline trimmed
        assert_eq!(out.len(), 199_999);
    }

    #[test]
    fn test_missing_command_is_a_launch_error() {
        let err =
            run_command("no-such-inspection-tool", &[], Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ProbeError::Launch { .. }));
    }

    #[test]
    fn test_nonzero_exit_is_reported() {
        let err = run_command("false", &[], Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ProbeError::Exit { .. }));
    }

    #[test]
    fn test_empty_output_is_an_error() {
        let err = run_command("true", &[], Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ProbeError::NoOutput { .. }));
    }

    #[test]
    fn test_hung_command_is_killed_on_timeout() {
        let err = run_command("sleep", &["5"], Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { .. }));
    }
}
