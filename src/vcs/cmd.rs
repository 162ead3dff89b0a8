//! Thin subprocess command builder, modeled on the call-site shape used
//! throughout the VCS adapter: build argv, set a working directory, run, and
//! get back the raw `Output` with logging already applied.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::Context;

/// Builder around [`std::process::Command`] that logs the invocation at
/// `debug!` before running it, shell-quoting arguments the way a user would
/// have to type them.
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<std::path::PathBuf>,
    envs: Vec<(String, String)>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn run(self) -> anyhow::Result<Output> {
        let quoted: Vec<String> = self
            .args
            .iter()
            .map(|a| shell_escape::escape(std::borrow::Cow::from(a.as_str())).into_owned())
            .collect();
        log::debug!("+ {} {}", self.program, quoted.join(" "));

        let mut command = Command::new(&self.program);
        command.args(self.args.iter().map(OsStr::new));
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }
        command
            .output()
            .with_context(|| format!("failed to execute: {} {}", self.program, quoted.join(" ")))
    }
}
