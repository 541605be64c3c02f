//! Line sink shared by the text outputs: the process streams by default, or any
//! injected `Write` target (tests, files, pipes).

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Which process stream a line goes to when no custom target is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

#[derive(Default)]
pub(crate) struct LineWriter {
    custom: Option<Mutex<Box<dyn Write + Send>>>,
}

impl fmt::Debug for LineWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineWriter")
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl LineWriter {
    pub(crate) fn custom(target: impl Write + Send + 'static) -> Self {
        Self {
            custom: Some(Mutex::new(Box::new(target))),
        }
    }

    /// Writes `line` plus a newline. `stream` is ignored when a custom target is set.
    pub(crate) fn write_line(&self, stream: Stream, line: &str) -> io::Result<()> {
        if let Some(custom) = &self.custom {
            let mut target = custom.lock().unwrap_or_else(PoisonError::into_inner);
            return writeln!(target, "{line}");
        }

        match stream {
            Stream::Stdout => writeln!(io::stdout(), "{line}"),
            Stream::Stderr => writeln!(io::stderr(), "{line}"),
        }
    }

    pub(crate) fn flush(&self) -> io::Result<()> {
        if let Some(custom) = &self.custom {
            return custom
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .flush();
        }

        io::stdout().flush()?;
        io::stderr().flush()
    }
}
