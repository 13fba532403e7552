use std::process::ExitCode;

use unwoff::convert_woff;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(infile), Some(outfile)) = (args.next(), args.next()) else {
        eprintln!("usage: unwoff <input.woff> <output.otf>");
        return ExitCode::FAILURE;
    };

    let woff = match std::fs::read(&infile) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to read {infile}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let sfnt = match convert_woff(&woff) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to convert {infile}: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = std::fs::write(&outfile, &sfnt) {
        eprintln!("failed to write {outfile}: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
