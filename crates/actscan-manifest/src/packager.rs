//! Packaging of multi-file actions
//!
//! A multi-file action is a directory that must be archived before it can be
//! deployed. The scanner only needs the path of the resulting archive, so the
//! packaging step sits behind the [`Packager`] trait. [`CommandPackager`] is the
//! production adapter: it runs `<tool> -zipf <dir>` and parses the tool's text
//! output, which is the only place that knows the output format.

use crate::errors::PackagingError;
use crate::runtime::base_name;
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;
use wait_timeout::ChildExt;

/// Flag asking the packaging tool to zip a directory
pub const ZIP_FLAG: &str = "-zipf";

/// Turns a multi-file action directory into a deployable archive
pub trait Packager {
    /// Package `dir` and return the path of the finished archive.
    ///
    /// The archive must exist when this returns `Ok`.
    fn package(&self, dir: &Path) -> Result<PathBuf, PackagingError>;
}

/// Runs an external packaging tool as a subprocess, one invocation at a time
#[derive(Debug, Clone)]
pub struct CommandPackager {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl CommandPackager {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandPackager {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Arguments passed before `-zipf <dir>` (e.g. a wrapper script for an interpreter)
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Kill the tool if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn_error(&self, source: std::io::Error) -> PackagingError {
        PackagingError::Spawn {
            program: self.program.display().to_string(),
            source,
        }
    }

    fn run(&self, dir: &Path) -> Result<Output, PackagingError> {
        debug!("Running {} {} {}", self.program.display(), ZIP_FLAG, dir.display());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(ZIP_FLAG)
            .arg(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Both pipes are drained while waiting, or a chatty tool blocks on a full pipe
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match self.timeout {
            Some(timeout) => match child.wait_timeout(timeout) {
                Ok(Some(status)) => status,
                Ok(None) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Readers are left detached: a grandchild may still hold the pipes
                    return Err(PackagingError::TimedOut(timeout));
                }
                Err(e) => return Err(self.spawn_error(e)),
            },
            None => child.wait().map_err(|e| self.spawn_error(e))?,
        };

        Ok(Output {
            status,
            stdout: collect(stdout),
            stderr: collect(stderr),
        })
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

impl Packager for CommandPackager {
    fn package(&self, dir: &Path) -> Result<PathBuf, PackagingError> {
        let output = self.run(dir)?;
        actscan_logger::capture_output(
            &format!("{} {} {}", self.program.display(), ZIP_FLAG, dir.display()),
            &output,
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_packager_output(&stdout) {
            Some(archive) => Ok(archive_path(dir, archive)),
            None => match output.status.code() {
                Some(status) if status != 0 => Err(PackagingError::Failed {
                    status,
                    output: stdout.into_owned(),
                }),
                _ => Err(PackagingError::MalformedOutput(stdout.into_owned())),
            },
        }
    }
}

/// Extract the archive file name from the packaging tool's stdout.
///
/// Success output ends with `.zip` plus a newline and carries the archive path
/// as its third space-separated token, e.g. `created zip /p/pkg/action.zip\n`.
/// Returns `None` for any other shape.
pub fn parse_packager_output(output: &str) -> Option<&str> {
    if !output.ends_with(".zip\n") {
        return None;
    }
    let token = output.split(' ').nth(2)?;
    let name = base_name(token.trim()).trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Archives are written next to the action directory, inside its package
fn archive_path(action_dir: &Path, archive: &str) -> PathBuf {
    action_dir
        .parent()
        .map_or_else(|| PathBuf::from(archive), |package_dir| package_dir.join(archive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_packager_output() {
        assert_eq!(
            parse_packager_output("created zip /tmp/p/pkg/multi.zip\n"),
            Some("multi.zip")
        );
        assert_eq!(
            parse_packager_output("zip created: multi.zip\n"),
            Some("multi.zip")
        );
    }

    #[test]
    fn test_parse_packager_output_rejects_other_shapes() {
        assert_eq!(parse_packager_output("created zip multi.zip"), None);
        assert_eq!(parse_packager_output("error: cannot zip\n"), None);
        assert_eq!(parse_packager_output(".zip\n"), None);
        assert_eq!(parse_packager_output(""), None);
    }

    #[test]
    fn test_archive_path_is_inside_package() {
        let path = archive_path(Path::new("project/packages/pkg/multi"), "multi.zip");
        assert_eq!(path, PathBuf::from("project/packages/pkg/multi.zip"));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let packager = CommandPackager::new("/nonexistent/actscan-packager");
        let result = packager.package(Path::new("."));
        assert!(matches!(result, Err(PackagingError::Spawn { .. })));
    }

    #[cfg(unix)]
    mod script {
        use super::*;
        use std::fs;
        use tempfile::TempDir;

        /// Scripts run through `sh` so the test never executes a file it just wrote
        fn script_packager(dir: &Path, body: &str) -> CommandPackager {
            let path = dir.join("packager.sh");
            let _ = fs::write(&path, format!("{}\n", body));
            CommandPackager::new("sh").with_args([path])
        }

        #[test]
        fn test_command_packager_success() {
            let Ok(temp_dir) = TempDir::new() else {
                return;
            };
            let packager = script_packager(
                temp_dir.path(),
                r#"test "$1" = "-zipf" || exit 2
echo "created zip $2.zip""#,
            );

            let action_dir = temp_dir.path().join("pkg").join("multi");
            let result = packager.package(&action_dir);
            assert!(result.is_ok(), "packaging failed: {:?}", result);
            assert_eq!(
                result.unwrap_or_default(),
                temp_dir.path().join("pkg").join("multi.zip")
            );
        }

        #[test]
        fn test_command_packager_malformed_output() {
            let Ok(temp_dir) = TempDir::new() else {
                return;
            };
            let packager = script_packager(temp_dir.path(), "echo 'nothing to do'");

            let result = packager.package(temp_dir.path());
            match result {
                Err(PackagingError::MalformedOutput(raw)) => assert_eq!(raw, "nothing to do\n"),
                other => panic!("unexpected result: {:?}", other),
            }
        }

        #[test]
        fn test_command_packager_nonzero_exit() {
            let Ok(temp_dir) = TempDir::new() else {
                return;
            };
            let packager = script_packager(temp_dir.path(), "echo 'boom'; exit 3");

            let result = packager.package(temp_dir.path());
            assert!(matches!(result, Err(PackagingError::Failed { status: 3, .. })));
        }

        #[test]
        fn test_command_packager_timeout() {
            let Ok(temp_dir) = TempDir::new() else {
                return;
            };
            let result = script_packager(temp_dir.path(), "sleep 5; echo 'late x y.zip'")
                .with_timeout(Some(Duration::from_millis(200)))
                .package(temp_dir.path());
            assert!(matches!(result, Err(PackagingError::TimedOut(_))));
        }

        #[test]
        fn test_command_packager_large_output_does_not_stall() {
            let Ok(temp_dir) = TempDir::new() else {
                return;
            };
            let packager = script_packager(
                temp_dir.path(),
                r#"head -c 200000 /dev/zero | tr '\0' a >&2
head -c 200000 /dev/zero | tr '\0' b
echo
echo "created zip $2.zip""#,
            )
            .with_timeout(Some(Duration::from_secs(10)));

            let action_dir = temp_dir.path().join("pkg").join("multi");
            let result = packager.package(&action_dir);
            assert!(result.is_ok(), "packaging failed: {:?}", result);
            assert_eq!(
                result.unwrap_or_default(),
                temp_dir.path().join("pkg").join("multi.zip")
            );
        }
    }
}
