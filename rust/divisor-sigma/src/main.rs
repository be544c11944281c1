//! sigma2 CLI: print σ₂(n²) for a single integer.
//!
//! Usage:
//!   sigma2 <n>      Evaluate for n
//!   sigma2          Prompt for n on stdin

use std::io::{self, BufRead, Write};

use divisor_sigma::{parse_integer, sigma2_of_square};

fn read_from_prompt() -> io::Result<String> {
    print!("Enter an integer: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn main() {
    env_logger::init();

    let raw = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => match read_from_prompt() {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error: failed to read input: {}", e);
                std::process::exit(1);
            }
        },
    };

    let n = match parse_integer(&raw) {
        Ok(n) => n,
        Err(e) => {
            log::debug!("Rejected input: {}", e);
            eprintln!("Please pass an integer.");
            std::process::exit(1);
        }
    };

    let squared = &n * &n;
    let sigma2 = sigma2_of_square(&n);
    log::info!("sigma_2 computed for {} ({} bits)", n, n.bits());

    println!("n = {}", n);
    println!("n^2 = {}", squared);
    println!("sigma_2(n^2) = {}", sigma2);
}
