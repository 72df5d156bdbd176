//! Child process execution with live output streaming

use super::command::CommandLine;
use crate::error::InstallError;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Splits a pipe on `\n`, `\r\n` or a lone `\r`.
///
/// Progress bars from composer and npm redraw with `\r`; each redraw
/// becomes its own segment so it reaches the sink while the tool is running.
struct Segments<R> {
    reader: R,
    pending: Vec<u8>,
    // Last segment ended in `\r`; a `\n` right after it belongs to it
    skip_lf: bool,
}

impl<R: AsyncBufRead + Unpin> Segments<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            skip_lf: false,
        }
    }

    /// Next segment without its terminator, `None` once the pipe is closed.
    ///
    /// Cancel safe: bytes read before a cancellation stay in `pending`.
    async fn next_segment(&mut self) -> std::io::Result<Option<String>> {
        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(self.take_pending()));
            }

            let mut start = 0;
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    start = 1;
                }
            }

            match available[start..]
                .iter()
                .position(|b| *b == b'\n' || *b == b'\r')
            {
                Some(pos) => {
                    let end = start + pos;
                    self.pending.extend_from_slice(&available[start..end]);
                    self.skip_lf = available[end] == b'\r';
                    self.reader.consume(end + 1);
                    return Ok(Some(self.take_pending()));
                }
                None => {
                    let len = available.len();
                    self.pending.extend_from_slice(&available[start..]);
                    self.reader.consume(len);
                }
            }
        }
    }

    fn take_pending(&mut self) -> String {
        let segment = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        segment
    }
}

/// Which pipe a streamed line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Receives each line of child output as soon as it is read
pub trait OutputSink {
    fn line(&mut self, stream: Stream, line: &str);
}

impl<F> OutputSink for F
where
    F: FnMut(Stream, &str),
{
    fn line(&mut self, stream: Stream, line: &str) {
        self(stream, line)
    }
}

/// Prints stdout lines indented and stderr lines in yellow
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn line(&mut self, stream: Stream, line: &str) {
        match stream {
            Stream::Stdout => println!("  {}", line),
            Stream::Stderr => eprintln!("  {}", line.yellow()),
        }
    }
}

/// Output of a command that exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Combined stdout and stderr, in the order lines were read. A `\r`
    /// redraw is kept as a line of its own.
    pub output: String,
}

/// Something that can run an external command to completion.
///
/// A non-zero exit is reported as [`InstallError::CommandFailed`]; callers
/// decide whether that ends the run.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&mut self, command: &CommandLine, dir: &Path)
        -> Result<CommandOutput, InstallError>;
}

/// Runs commands as real child processes
pub struct ProcessRunner<S = ConsoleSink> {
    sink: S,
    inherit_stdin: bool,
}

impl ProcessRunner<ConsoleSink> {
    /// Runner that streams to the console
    pub fn console() -> Self {
        Self::new(ConsoleSink)
    }
}

impl<S: OutputSink> ProcessRunner<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            inherit_stdin: stdin_is_tty(),
        }
    }

    /// Override terminal detection for the child's stdin
    pub fn inherit_stdin(mut self, inherit: bool) -> Self {
        self.inherit_stdin = inherit;
        self
    }
}

/// Interactive sub-tools (composer, artisan) may ask questions; hand them our
/// terminal when there is one. Windows consoles are not passed through.
fn stdin_is_tty() -> bool {
    cfg!(not(windows)) && std::io::stdin().is_terminal()
}

impl<S: OutputSink> CommandRunner for ProcessRunner<S> {
    async fn run(
        &mut self,
        command: &CommandLine,
        dir: &Path,
    ) -> Result<CommandOutput, InstallError> {
        let display = command.to_string();
        let stdin = if self.inherit_stdin {
            Stdio::inherit()
        } else {
            Stdio::null()
        };

        let spawned = TokioCommand::new(&command.program)
            .args(&command.args)
            .current_dir(dir)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                return Err(InstallError::CommandFailed {
                    command: display,
                    code: None,
                    output: format!("Failed to start {} in {}: {}", command.program, dir.display(), e),
                })
            }
        };

        let mut output = String::new();

        // Both pipes were requested above, so they are always present
        if let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) {
            let mut stdout_reader = Segments::new(BufReader::new(stdout));
            let mut stderr_reader = Segments::new(BufReader::new(stderr));
            let mut stdout_open = true;
            let mut stderr_open = true;

            while stdout_open || stderr_open {
                tokio::select! {
                    line = stdout_reader.next_segment(), if stdout_open => {
                        match line {
                            Ok(Some(line)) => {
                                self.sink.line(Stream::Stdout, &line);
                                output.push_str(&line);
                                output.push('\n');
                            }
                            Ok(None) => stdout_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                stdout_open = false;
                            }
                        }
                    }
                    line = stderr_reader.next_segment(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => {
                                self.sink.line(Stream::Stderr, &line);
                                output.push_str(&line);
                                output.push('\n');
                            }
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        }

        let status = child.wait().await.map_err(|e| InstallError::CommandFailed {
            command: display.clone(),
            code: None,
            output: format!("{}Failed to wait for {}: {}", output, command.program, e),
        })?;

        if status.success() {
            Ok(CommandOutput { output })
        } else {
            Err(InstallError::CommandFailed {
                command: display,
                code: status.code(),
                output,
            })
        }
    }
}
