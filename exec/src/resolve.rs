//! Pluggable executable path resolution.
//!
//! Adapters never look up tool paths themselves; the orchestrator asks a
//! resolver for the configured tool's bare command name and passes the
//! result to the process runner.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::shell::DetectedShell;

/// Resolves a bare command name to a runnable path on the host.
pub trait ExecutableResolver: Send + Sync {
    /// Returns `None` when the command cannot be found; the caller reports
    /// that as a configuration problem for the owning tool.
    fn resolve(&self, command: &str) -> Option<PathBuf>;
}

/// PATH-based resolution via the `which` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichResolver;

impl ExecutableResolver for WhichResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        match which::which(command) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!(command, "which lookup failed: {e}");
                None
            }
        }
    }
}

/// Resolution through the user's interactive shell.
///
/// Runs `which <name>` (or `where` on Windows) inside the detected shell so
/// that PATH entries added by profile scripts are visible. Slower than
/// [`WhichResolver`]; intended for hosts where tools are only on the
/// interactive PATH.
#[derive(Debug, Clone)]
pub struct ShellWhichResolver {
    shell: DetectedShell,
}

impl ShellWhichResolver {
    #[must_use]
    pub fn new(shell: DetectedShell) -> Self {
        Self { shell }
    }

    fn lookup_command(command: &str) -> String {
        if cfg!(windows) {
            format!("where {command}")
        } else {
            format!("which {command}")
        }
    }
}

impl ExecutableResolver for ShellWhichResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        let output = Command::new(&self.shell.binary)
            .args(&self.shell.args)
            .arg(Self::lookup_command(command))
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(shell = %self.shell, command, "shell lookup failed: {e}");
                return None;
            }
        };
        if !output.status.success() {
            return None;
        }

        // `where` can print multiple matches; the first line wins.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().map(str::trim).find(|l| !l.is_empty())?;
        let path = PathBuf::from(line);
        path.is_absolute().then_some(path)
    }
}

/// Resolver chain used by the orchestrator: an explicitly configured path
/// wins, otherwise the resolver is consulted for the bare command name.
#[must_use]
pub fn resolve_tool(
    configured: Option<&Path>,
    default_command: &str,
    resolver: &dyn ExecutableResolver,
) -> Option<PathBuf> {
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }
    resolver.resolve(default_command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::detect_shell;

    struct FixedResolver(Option<PathBuf>);

    impl ExecutableResolver for FixedResolver {
        fn resolve(&self, _command: &str) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    #[test]
    fn test_configured_path_wins() {
        let resolver = FixedResolver(Some(PathBuf::from("/resolved/tool")));
        let path = resolve_tool(
            Some(Path::new("/configured/tool")),
            "tool",
            &resolver,
        );
        assert_eq!(path, Some(PathBuf::from("/configured/tool")));
    }

    #[test]
    fn test_falls_back_to_resolver() {
        let resolver = FixedResolver(Some(PathBuf::from("/resolved/tool")));
        let path = resolve_tool(None, "tool", &resolver);
        assert_eq!(path, Some(PathBuf::from("/resolved/tool")));
    }

    #[test]
    fn test_unresolvable_is_none() {
        let resolver = FixedResolver(None);
        assert_eq!(resolve_tool(None, "tool", &resolver), None);
    }

    #[test]
    fn test_which_resolver_finds_sh() {
        #[cfg(unix)]
        {
            let path = WhichResolver.resolve("sh").unwrap();
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn test_which_resolver_misses_unknown_command() {
        assert!(WhichResolver.resolve("vlint-no-such-tool-xyz").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_which_resolver_finds_sh() {
        let resolver = ShellWhichResolver::new(detect_shell(None));
        let path = resolver.resolve("sh").unwrap();
        assert!(path.is_absolute());
    }
}
