//! Reading schema files out of a git revision
//!
//! Uses the system `git` command against a local repository, so any revision
//! the repository knows about (branch, tag, commit) can be read without
//! checking it out. Each call spawns one short-lived `git` process whose
//! output is fully read before the function returns.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Run `git -C <repo> <args>` and return its stdout.
fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
    let command = args.join(" ");
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            repo: repo.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command,
            repo: repo.display().to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn normalize_dir(dir: &str) -> &str {
    dir.trim_matches('/')
}

/// Check whether `dir` is a directory in the tree of `git_ref`.
pub fn path_exists_in_tree(repo: &Path, git_ref: &str, dir: &str) -> Result<bool> {
    let dir = normalize_dir(dir);
    let stdout = run_git(repo, &["ls-tree", "-d", "--name-only", git_ref, "--", dir])?;
    Ok(stdout.lines().any(|line| line == dir))
}

/// List the paths of the blobs directly under `dir` in `git_ref`.
///
/// Paths are relative to the repository root, in git's tree order.
pub fn list_blobs(repo: &Path, git_ref: &str, dir: &str) -> Result<Vec<String>> {
    let prefix = format!("{}/", normalize_dir(dir));
    let stdout = run_git(repo, &["ls-tree", git_ref, "--", &prefix])?;

    // Git ls-tree output format: <mode> SP <type> SP <hash> TAB <path>
    let blobs = stdout
        .lines()
        .filter_map(|line| {
            let (meta, path) = line.split_once('\t')?;
            let kind = meta.split_whitespace().nth(1)?;
            (kind == "blob").then(|| path.to_string())
        })
        .collect();
    Ok(blobs)
}

/// Read the content of the blob at `path` in `git_ref`.
pub fn read_blob(repo: &Path, git_ref: &str, path: &str) -> Result<String> {
    run_git(repo, &["show", &format!("{}:{}", git_ref, path)])
}
