//! Build configuration emitter.
//!
//! Turns `NAME[=VALUE]` definitions into the `SET (...)` statements read by
//! the CMake scripts of the Windows build.

use displaydoc::Display;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Definitions that are emitted as `SET (<definition> TRUE)` when present.
pub const FLAGS: &[&str] = &["__NT__", "CYBOZU", "EXTRA_DEBUG", "ENABLED_DEBUG_SYNC", "EMBED_MANIFESTS"];

/// Compilation comment used when none is given.
pub const DEFAULT_COMMENT: &str = "Source distribution";

/// Default MySQL TCP port.
pub const DEFAULT_PORT: u16 = 3306;

/// Error writing the build configuration.
#[derive(Display, Error, Debug)]
pub enum Error {
    /// cannot create {path:?}
    Create { path: PathBuf, source: io::Error },
    /// cannot write {path:?}
    Write { path: PathBuf, source: io::Error },
}

/// A `NAME[=VALUE]` definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition<'a> {
    /// Definition as given.
    pub raw: &'a str,
    /// Part before the first `=`.
    pub name: &'a str,
    /// Part after the first `=`, empty if there is none.
    pub value: &'a str,
}

impl<'a> Definition<'a> {
    /// Splits a definition at its first `=`.
    pub fn parse(raw: &'a str) -> Self {
        let (name, value) = raw.split_once('=').unwrap_or((raw, ""));
        Self { raw, name, value }
    }

    /// Whether this definition is a flag.
    pub fn is_flag(&self) -> bool {
        FLAGS.contains(&self.name)
    }
}

/// Settings accumulated while scanning the definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Compilation comment.
    pub comment: String,
    /// Default TCP port, 0 if the port was defaulted.
    pub default_port: u16,
    /// TCP port as given.
    pub port: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self { comment: DEFAULT_COMMENT.to_string(), default_port: DEFAULT_PORT, port: "0".to_string() }
    }
}

impl Settings {
    /// Applies a definition, writing flags to `out` immediately.
    fn apply(&mut self, def: &Definition, out: &mut impl Write) -> io::Result<()> {
        match def.name {
            _ if def.is_flag() => {
                log::debug!("flag {}", def.raw);
                writeln!(out, "SET ({} TRUE)", def.raw)?;
            }
            "COMPILATION_COMMENT" => {
                log::debug!("compilation comment: {}", def.value);
                self.comment = def.value.to_string();
            }
            "MYSQL_TCP_PORT" => {
                log::debug!("TCP port: {}", def.value);
                self.port = def.value.to_string();
            }
            _ => log::debug!("ignoring {}", def.raw),
        }
        Ok(())
    }

    /// Substitutes the default port if no port was set.
    ///
    /// The default port is then reported as 0, so that an explicitly requested
    /// port equal to the default stays distinguishable from a defaulted one.
    /// An explicit port of 0 counts as not set.
    pub fn resolve_port(&mut self) {
        if is_unset_port(&self.port) {
            self.port = self.default_port.to_string();
            self.default_port = 0;
        }
        log::debug!("resolved TCP port {} with default {}", self.port, self.default_port);
    }

    /// Writes the comment and port statements.
    fn write(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "SET (COMPILATION_COMMENT \"{}\")", self.comment)?;
        writeln!(out, "SET (MYSQL_TCP_PORT_DEFAULT \"{}\")", self.default_port)?;
        writeln!(out, "SET (MYSQL_TCP_PORT \"{}\")", self.port)?;
        Ok(())
    }
}

/// Empty or made of zero digits only, ignoring surrounding whitespace.
fn is_unset_port(port: &str) -> bool {
    port.trim().chars().all(|c| c == '0')
}

/// Writes the build configuration for `definitions` to `out`.
pub fn emit<S: AsRef<str>>(out: &mut impl Write, definitions: &[S]) -> io::Result<Settings> {
    let mut settings = Settings::default();
    for def in definitions {
        settings.apply(&Definition::parse(def.as_ref()), out)?;
    }

    settings.resolve_port();
    settings.write(out)?;

    Ok(settings)
}

/// Writes the build configuration for `definitions` to the file `output`,
/// replacing its previous contents.
pub fn run<S: AsRef<str>>(definitions: &[S], output: &Path) -> Result<Settings, Error> {
    let file = File::create(output).map_err(|source| Error::Create { path: output.to_path_buf(), source })?;
    let write_err = |source| Error::Write { path: output.to_path_buf(), source };

    let mut writer = BufWriter::new(file);
    let settings = emit(&mut writer, definitions).map_err(write_err)?;
    writer.into_inner().map_err(|err| write_err(err.into_error()))?;

    Ok(settings)
}
