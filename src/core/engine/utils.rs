use std::path::Path;

/// Final path component of a compiler identity, lowercased.
///
/// Both `/` and `\` count as separators so Windows paths are handled on any host.
pub fn compiler_basename(compiler: &str) -> String {
    compiler
        .trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Basename with a trailing `.exe` removed
pub fn compiler_stem(compiler: &str) -> String {
    let base = compiler_basename(compiler);
    match base.strip_suffix(".exe") {
        Some(stem) => stem.to_string(),
        None => base,
    }
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_handles_both_separators() {
        assert_eq!(compiler_basename("/usr/bin/g++"), "g++");
        assert_eq!(
            compiler_basename(r"C:\Program Files\MSVC\bin\CL.EXE"),
            "cl.exe"
        );
        assert_eq!(compiler_basename("clang++"), "clang++");
    }

    #[test]
    fn stem_drops_exe_suffix() {
        assert_eq!(compiler_stem("CL.exe"), "cl");
        assert_eq!(compiler_stem("cl"), "cl");
        assert_eq!(compiler_stem("clang-cl.exe"), "clang-cl");
    }
}
