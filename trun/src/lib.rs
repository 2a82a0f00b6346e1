//! Runs assembled program images.
//!
//! [`run_file`](fn.run_file.html) wires an image file to the standard
//! streams; [`run_image`](fn.run_image.html) is the stream-generic core
//! that tests and embedders can call directly.

use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tvm::{ExitCode, Memory, Processor};

#[derive(Debug)]
pub enum Error {
    Read(io::Error, PathBuf),
    Flush(io::Error),
    Load(tvm::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read(err, path) => {
                write!(f, "Reading program \"{}\" failed: {}", path.display(), err)
            }
            Error::Flush(err) => write!(f, "Flushing output failed: {}", err),
            Error::Load(err) => write!(f, "Loading program failed: {}", err),
        }
    }
}

impl From<tvm::Error> for Error {
    fn from(err: tvm::Error) -> Error {
        Error::Load(err)
    }
}

/// Executes an image against the given streams and reports how it
/// stopped.
pub fn run_image<R: Read, W: Write>(
    bytes: &[u8],
    input: &mut R,
    output: &mut W,
) -> Result<ExitCode, Error> {
    let mut memory = Memory::load(bytes)?;
    let mut processor = Processor::new();

    Ok(processor.run(&mut memory, input, output))
}

/// Reads the image file at `path` and executes it on the standard
/// streams.
pub fn run_file<P: AsRef<Path>>(path: P) -> Result<ExitCode, Error> {
    let image = tvifile::read_file(&path)
        .map_err(|err| Error::Read(err, path.as_ref().to_owned()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let code = run_image(image.bytes(), &mut stdin.lock(), &mut stdout.lock())?;

    // The caller usually exits the process right away, which would skip
    // the buffered writer's drop.
    stdout.lock().flush().map_err(Error::Flush)?;

    Ok(code)
}
