#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use regcost::types::ToolchainSpec;
use regcost::{BuildExecutor, ToolchainRegistry};

/// Serializes script creation and process spawning across tests, so no
/// forked child holds a write handle to a script another test is exec'ing.
pub static SPAWN_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// Stub compiler: writes an object whose size grows by 64 bytes per registration
pub const SCALING_COMPILER: &str = r#"#!/bin/sh
out=""
src=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    *) src="$1"; shift ;;
  esac
done
n=$(grep -c 'AddSingleton<' "$src")
head -c $((128 + n * 64)) /dev/zero > "$out"
"#;

pub const FAILING_COMPILER: &str = r#"#!/bin/sh
echo "fatal error: Skirnir.hpp: No such file or directory" >&2
exit 1
"#;

/// Leaves a partial artifact behind and then hangs
pub const HANGING_COMPILER: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    -o) echo partial > "$2"; shift 2 ;;
    *) shift ;;
  esac
done
exec sleep 30
"#;

/// Hands the artifact to a forked worker that writes it late, like a driver
/// waiting on cc1plus
pub const FORKING_COMPILER: &str = r#"#!/bin/sh
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
( sleep 2; echo partial > "$out" ) &
wait
"#;

pub const SILENT_COMPILER: &str = "#!/bin/sh\nexit 0\n";

#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write stub compiler");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make stub compiler executable");
    path
}

pub fn spec_for(compiler: &Path) -> ToolchainSpec {
    ToolchainSpec {
        compiler: compiler.to_string_lossy().into_owned(),
        standard: "20".to_string(),
        optimization: "-O2".to_string(),
        include_dirs: Vec::new(),
        compile_only: false,
    }
}

pub fn executor(compiler: &Path, work_dir: &Path, timeout: Duration) -> BuildExecutor {
    BuildExecutor::new(
        Arc::new(ToolchainRegistry::default()),
        spec_for(compiler),
        timeout,
        work_dir.to_path_buf(),
    )
}

pub fn residual_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("Failed to list work dir")
        .map(|entry| entry.expect("Failed to read dir entry").path())
        .collect()
}
