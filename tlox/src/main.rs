use console::style;
use std::io::{self, Write};
use std::{env, fs, process};
use tlox::{RunError, EXIT_IO_ERR, EXIT_NO_INPUT, EXIT_USAGE};

fn main() {
    tlox::logging::init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let code = match args.as_slice() {
        [] => run_prompt(),
        [path] => run_file(path),
        _ => {
            eprintln!("Usage: tlox [script]");
            EXIT_USAGE
        }
    };
    process::exit(code);
}

fn report(err: &RunError) {
    eprintln!("{}", style(err).red().for_stderr());
}

/// Runs a script once. Returns the exit status.
fn run_file(path: &str) -> i32 {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Could not read {}: {}", path, err);
            return EXIT_NO_INPUT;
        }
    };

    let mut interpreter = tlox::new_interpreter(io::stdout());
    match tlox::run(&content, &mut interpreter) {
        Ok(()) => 0,
        Err(err) => {
            report(&err);
            err.exit_code()
        }
    }
}

/// Reads and runs one line at a time until end of input. Errors do not end the session.
fn run_prompt() -> i32 {
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut interpreter = tlox::new_interpreter(io::stdout());

    loop {
        print!("{} ", style(">").bold());
        if let Err(err) = stdout.flush() {
            eprintln!("{}", err);
            return EXIT_IO_ERR;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => return 0, // end of input
            Ok(_) => {}
            Err(err) => {
                eprintln!("{}", err);
                return EXIT_IO_ERR;
            }
        }

        if let Err(err) = tlox::run(&input, &mut interpreter) {
            report(&err);
        }
    }
}
