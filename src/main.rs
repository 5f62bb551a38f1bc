#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{env, io};

fn main() -> io::Result<()> {
    if env::args().nth(1).as_deref() == Some("fuzz") {
        woodpusher::fuzz::fuzz();
    }
    woodpusher::repl::repl()
}
