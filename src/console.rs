// src/console.rs

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Bold header line, printed before each scenario group.
pub fn bold(text: &str) {
    println!("{}{}{}", BOLD, text, RESET);
}

/// Green line for a passed assertion.
pub fn pass(text: &str) {
    println!("{}{}{}", GREEN, text, RESET);
}

/// Red line for a failed assertion.
pub fn fail(text: &str) {
    println!("{}{}{}", RED, text, RESET);
}

/// Yellow line for progress notes that are neither pass nor fail.
pub fn note(text: &str) {
    println!("{}{}{}", YELLOW, text, RESET);
}
