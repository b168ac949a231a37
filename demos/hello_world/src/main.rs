//! Greeting demo wired through `flenv`.
//!
//! Run with `--help` for the generated usage text, or try:
//!
//! ```text
//! hello_world --name world --shout --repeat 2
//! HELLO_GREETING=Howdy hello_world --name partner
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut registry = flenv::Registry::builder()
        .app_name("hello_world")
        .version(env!("CARGO_PKG_VERSION"))
        .env_prefix("HELLO_")
        .build();

    let name = registry.string("name", "Who to greet").required();
    let greeting = registry
        .string("greeting", "Greeting word")
        .default_value("Hello".to_owned());
    let shout = registry.toggle("shout", "Uppercase the output");
    let repeat = registry
        .integer("repeat", "Number of repetitions")
        .default_value(1);

    registry.parse();

    let mut line = format!(
        "{}, {}!",
        greeting.get().unwrap_or_default(),
        name.get().unwrap_or_default()
    );
    if shout.get().unwrap_or(false) {
        line = line.to_uppercase();
    }

    let mut stdout = io::stdout().lock();
    for _ in 0..repeat.get().unwrap_or(1) {
        if writeln!(stdout, "{line}").is_err() {
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
