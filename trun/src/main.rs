#[macro_use]
extern crate clap;

use std::process;

use clap::Arg;
use tvm::ExitCode;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("Program image to execute")
                .required(true)
                .index(1),
        )
        .get_matches();

    let program = matches.value_of("PROGRAM").unwrap();

    match trun::run_file(program) {
        Ok(ExitCode::Exited(status)) => process::exit(status as i32),
        Ok(code) => {
            eprintln!("{}", code);
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
