//! User-facing status lines.

use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use std::fmt;

const BOLD: &str = "\x1b[1m";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{GREEN}{BOLD}✔{RESET} {msg}");
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{YELLOW}{BOLD}!{RESET} {msg}");
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{RED}{BOLD}✘{RESET} {msg}");
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{CYAN}{BOLD}== {msg} =={RESET}\n");
}

/// Aligned `label: value` line used by summary blocks.
pub fn field<T: fmt::Display>(label: &str, value: T) {
    println!("  {CYAN}{label:<18}{RESET} {value}");
}
