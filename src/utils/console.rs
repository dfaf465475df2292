//! Styled lines for the user-facing console sink.

use ::console::style;
use std::fmt::Display;
use std::io::{self, Write};

pub fn heading(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "\n{}", style(text).bold().blue())
}

pub fn field(out: &mut dyn Write, label: &str, value: impl Display) -> io::Result<()> {
    writeln!(out, "{} {}", style(format!("{label}:")).green(), value)
}

pub fn info(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", style(text).cyan())
}

pub fn success(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", style(text).green())
}

pub fn warn(out: &mut dyn Write, text: &str) -> io::Result<()> {
    log::warn!("{}", text);
    writeln!(out, "{}", style(text).yellow())
}

pub fn error(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", style(text).red())
}
