use std::env;
use std::fmt;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};

/// When set (non-empty), every launched command is echoed to stderr as
/// `$ <command>`, colored when stderr is a terminal.
const VERBOSE_VAR: &str = "JFLAT_VERBOSE";

/// An external command to run, with its stdout available captured or as
/// a live byte stream for the flattener to consume.
#[derive(Clone, Debug)]
pub struct Cmd {
    name: String,
    args: Vec<String>,
}

impl Cmd {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Build from an argv-style slice; `None` when the slice is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (name, args) = argv.split_first()?;
        Some(Self::new(name).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Resolve the program against `PATH`. A name containing a path
    /// separator is used as-is.
    pub fn lookup(&self) -> io::Result<PathBuf> {
        let name = Path::new(&self.name);
        if name.components().count() > 1 {
            if is_executable(name) {
                return Ok(name.to_path_buf());
            }
            return Err(self.not_found());
        }
        let path = env::var_os("PATH").unwrap_or_default();
        for dir in env::split_paths(&path) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            let candidate = dir.join(&self.name);
            if is_executable(&candidate) {
                return Ok(candidate);
            }
        }
        Err(self.not_found())
    }

    fn not_found(&self) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}: command not found", self.name),
        )
    }

    fn command(&self) -> io::Result<Command> {
        self.echo_verbose();
        let binary = self.lookup()?;
        let mut command = Command::new(binary);
        command.args(&self.args);
        Ok(command)
    }

    /// Run to completion and capture stdout; stderr passes through.
    /// A non-zero exit status is an error.
    pub fn output(&self) -> io::Result<String> {
        let out = self.command()?.stderr(Stdio::inherit()).output()?;
        if !out.status.success() {
            return Err(io::Error::other(format!("{}: {}", self.name, out.status)));
        }
        String::from_utf8(out.stdout)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "command output is not UTF-8"))
    }

    /// Spawn with piped stdout. The returned reader yields the child's
    /// stdout bytes and reaps the child when dropped.
    pub fn reader(&self) -> io::Result<CmdReader> {
        let mut child = self
            .command()?
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;
        let stdout = child.stdout.take().expect("child stdout is piped");
        Ok(CmdReader {
            child,
            stdout: Some(stdout),
        })
    }

    /// Run with inherited stdio and return the exit status.
    pub fn status(&self) -> io::Result<ExitStatus> {
        self.command()?.status()
    }

    pub fn success(&self) -> bool {
        self.status().map(|s| s.success()).unwrap_or(false)
    }

    /// Replace the current process image with the command. Only returns
    /// on failure.
    #[cfg(unix)]
    pub fn exec(&self) -> io::Error {
        use std::os::unix::process::CommandExt;
        match self.command() {
            Ok(mut command) => command.exec(),
            Err(e) => e,
        }
    }

    /// exec(3) is not available here; run the command to completion and
    /// exit with its status instead.
    #[cfg(not(unix))]
    pub fn exec(&self) -> io::Error {
        match self.status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(e) => e,
        }
    }

    fn echo_verbose(&self) {
        match env::var_os(VERBOSE_VAR) {
            Some(v) if !v.is_empty() => {}
            _ => return,
        }
        if io::stderr().is_terminal() {
            eprintln!("\x1b[35;1m$ {}\x1b[m", self);
        } else {
            eprintln!("$ {}", self);
        }
    }
}

impl fmt::Display for Cmd {
    /// Shell-quoted rendering for diagnostics: arguments containing a
    /// double quote are single-quoted; empty arguments or ones with
    /// spaces or single quotes are double-quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            if arg.contains('"') {
                write!(f, " '{}'", arg)?;
            } else if arg.is_empty() || arg.contains('\'') || arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Live stdout of a spawned command.
///
/// Dropping the reader closes the pipe first and then waits on the
/// child, so no zombie is left behind even when reading stops early.
pub struct CmdReader {
    child: Child,
    stdout: Option<ChildStdout>,
}

impl Read for CmdReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.stdout {
            Some(stdout) => stdout.read(buf),
            None => Ok(0),
        }
    }
}

impl Drop for CmdReader {
    fn drop(&mut self) {
        self.stdout.take();
        let _ = self.child.wait();
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
