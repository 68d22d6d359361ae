// src/runtime/mod.rs
//! JavaScript runtime library prepended to every generated program
//!
//! `common.js` is always included. `local.js` drives a program run on the
//! editor's own machine, `remote.js` one run on a connected device.

use crate::CompileError;
use std::fs;
use std::path::{Path, PathBuf};

const COMMON_JS: &str = include_str!("js/common.js");
const LOCAL_JS: &str = include_str!("js/local.js");
const REMOTE_JS: &str = include_str!("js/remote.js");

pub const COMMON_FILE: &str = "common.js";
pub const LOCAL_FILE: &str = "local.js";
pub const REMOTE_FILE: &str = "remote.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeLibrary {
    common: String,
    local: String,
    remote: String,
}

impl RuntimeLibrary {
    /// Library bundled with the crate
    pub fn builtin() -> Self {
        Self {
            common: COMMON_JS.to_string(),
            local: LOCAL_JS.to_string(),
            remote: REMOTE_JS.to_string(),
        }
    }

    /// Load the three library files from `dir`
    pub fn load(dir: &Path) -> Result<Self, CompileError> {
        Ok(Self {
            common: read(dir.join(COMMON_FILE))?,
            local: read(dir.join(LOCAL_FILE))?,
            remote: read(dir.join(REMOTE_FILE))?,
        })
    }

    /// Library text for a local or remote run
    pub fn source(&self, local: bool) -> String {
        let host = if local { &self.local } else { &self.remote };
        let mut source = String::with_capacity(self.common.len() + host.len() + 2);
        for part in [&self.common, host] {
            source.push_str(part);
            if !part.ends_with('\n') {
                source.push('\n');
            }
        }
        source
    }
}

impl Default for RuntimeLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn read(path: PathBuf) -> Result<String, CompileError> {
    fs::read_to_string(&path).map_err(|source| CompileError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defines_runtime_names() {
        let source = RuntimeLibrary::builtin().source(true);
        for name in [
            "_callStack",
            "_nilSound",
            "_createSound",
            "_genLockObj",
            "_tryLock",
            "_unlock",
            "_addEvent",
            "_println",
            "_aryGet",
            "_strToNum",
        ] {
            assert!(source.contains(name), "runtime library lacks {name}");
        }
    }

    #[test]
    fn test_local_and_remote_differ() {
        let library = RuntimeLibrary::builtin();
        assert_ne!(library.source(true), library.source(false));
    }

    #[test]
    fn test_load_missing_dir_is_io_error() {
        let dir = std::env::temp_dir().join("bunnyhop-no-such-runtime-dir");
        assert!(matches!(
            RuntimeLibrary::load(&dir),
            Err(CompileError::Io { .. })
        ));
    }
}
