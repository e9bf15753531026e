//! Process identity helpers

use std::fs;

/// Effective uid of the current process, read from `/proc/self/status`.
///
/// The `Uid:` line carries real, effective, saved, and filesystem ids in
/// that order. Returns `None` when procfs is unavailable.
pub fn effective_uid() -> Option<u32> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("Uid:"))?;
    line.split_whitespace().nth(2)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_uid_readable() {
        assert!(effective_uid().is_some());
    }
}
