#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::prelude::*;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Arg;
use tvifile::{Image, WriteTviExt};

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Asm(tasm::Error),
    Io(std::io::Error, IOErrorContext, PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => writeln!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::WriteOutput => "Writing output",
                },
                path.display(),
                err
            ),
            Error::Asm(err) => {
                writeln!(f, "Assembling input failed:")?;
                write!(f, "{}", err)
            }
        }
    }
}

fn main() {
    // Parse command line arguments
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Input file to assemble; `-` or absent reads standard input")
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .help("Output file; `-` or absent writes standard output"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap_or("-");
    let output = matches.value_of("output").unwrap_or("-");

    if let Err(err) = asm(input, output) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn asm(input: &str, output: &str) -> Result<(), Error> {
    let source = read_source(input)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, PathBuf::from(input)))?;

    let image = tasm::assemble(&source).map_err(|err| {
        Error::Asm(if input == "-" {
            err
        } else {
            err.with_path(input)
        })
    })?;

    write_image(output, &image)
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, PathBuf::from(output)))?;

    Ok(())
}

fn read_source(input: &str) -> io::Result<String> {
    let mut source = String::new();
    if input == "-" {
        let stdin = io::stdin();
        stdin.lock().read_to_string(&mut source)?;
    } else {
        BufReader::new(File::open(input)?).read_to_string(&mut source)?;
    }
    Ok(source)
}

fn write_image(output: &str, image: &Image) -> io::Result<()> {
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_tvi(image)?;
        handle.flush()
    } else {
        tvifile::write_file(output, image)
    }
}
