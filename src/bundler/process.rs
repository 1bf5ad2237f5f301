//! External process invocation with streamed logging.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::bundler::error::{Error, Result};
use crate::bundler::logger::{BuildLog, LineClass};

async fn drain_lines<R: AsyncRead + Unpin>(pipe: Option<R>, class: LineClass, log: &dyn BuildLog) {
    let Some(pipe) = pipe else { return };
    let mut lines = BufReader::new(pipe).lines();
    // A read error ends the drain; best-effort logging must never mask the
    // exit code of the child.
    while let Ok(Some(line)) = lines.next_line().await {
        if !line.is_empty() {
            log.add(&line, class);
        }
    }
}

/// Runs `argv` to completion, forwarding its output to the build log.
///
/// The joined command line is logged as `Initial` before the spawn. Each
/// output stream is forwarded line by line with its own classification;
/// arrival order is preserved within a stream but not between the two.
/// Suspends until the child terminates and returns its exit code verbatim,
/// or -1 when the child was terminated without one.
pub async fn run_command(argv: &[String], log: &dyn BuildLog) -> Result<i32> {
    let (program, rest) = argv.split_first().ok_or(Error::EmptyCommand)?;

    log.add(&argv.join(" "), LineClass::Initial);

    let mut child = Command::new(program)
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn {
            program: program.clone(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    tokio::join!(
        drain_lines(stdout, LineClass::Stdout, log),
        drain_lines(stderr, LineClass::Stderr, log),
    );

    let status = child.wait().await.map_err(|source| Error::Spawn {
        program: program.clone(),
        source,
    })?;
    Ok(status.code().unwrap_or(-1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CaptureLog {
        lines: Mutex<Vec<(LineClass, String)>>,
    }

    impl BuildLog for CaptureLog {
        fn add(&self, text: &str, class: LineClass) {
            self.lines.lock().unwrap().push((class, text.to_string()));
        }
        fn status(&self, _text: &str, _progress: Option<u8>) {}
        fn clear(&self) {}
    }

    #[tokio::test]
    async fn empty_argv_is_an_error() {
        let log = CaptureLog::default();
        let err = run_command(&[], &log).await.unwrap_err();
        assert!(matches!(err, Error::EmptyCommand));
    }

    #[tokio::test]
    async fn missing_binary_fails_to_spawn() {
        let log = CaptureLog::default();
        let argv = vec!["scapp-bundler-no-such-binary".to_string()];
        let err = run_command(&argv, &log).await.unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_code_and_streams_are_forwarded() {
        let log = CaptureLog::default();
        let argv = vec![
            "sh".to_string(),
            "-c".to_string(),
            "echo out-line; echo err-line 1>&2; exit 7".to_string(),
        ];
        let code = run_command(&argv, &log).await.unwrap();
        assert_eq!(code, 7);

        let lines = log.lines.lock().unwrap();
        assert_eq!(lines[0].0, LineClass::Initial);
        assert!(lines[0].1.contains("echo out-line"));
        assert!(
            lines
                .iter()
                .any(|(c, t)| *c == LineClass::Stdout && t == "out-line")
        );
        assert!(
            lines
                .iter()
                .any(|(c, t)| *c == LineClass::Stderr && t == "err-line")
        );
    }
}
