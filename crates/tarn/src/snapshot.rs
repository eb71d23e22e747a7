// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Optional version-control snapshotting of the storage root.

use std::io;
use std::path::Path;
use std::process::Command;

/// Capability to snapshot the managed storage root after a mutation.
///
/// Injected into the registrar so it can be disabled or replaced in tests.
/// Failures are reported by the caller as warnings and never abort an
/// otherwise-successful registration.
pub trait Snapshot: Send + Sync {
    fn commit(&self, root: &Path, message: &str) -> io::Result<()>;
}

/// Snapshots via the `git` CLI: add-all + commit inside the storage root.
///
/// The root must already be a git repository; if it is not, the commit
/// fails and the registrar logs a warning.
pub struct GitSnapshot;

impl Snapshot for GitSnapshot {
    fn commit(&self, root: &Path, message: &str) -> io::Result<()> {
        run_git(root, &["add", "."])?;
        run_git(root, &["commit", "-m", message])
    }
}

fn run_git(root: &Path, args: &[&str]) -> io::Result<()> {
    let output = Command::new("git").args(args).current_dir(root).output()?;
    if output.status.success() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "git {} failed: {}",
                args.first().unwrap_or(&""),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ))
    }
}
