//! Git plumbing: repo detection and template retrieval
//!
//! The engine itself only requires a readable local tree at the configured
//! paths; fetching is deliberately thin and kept at the edge.

use std::path::Path;

use tracing::info;

use crate::error::Result;

/// Does `root` look like a git repository root?
///
/// `.git` may be a directory or, for worktrees and submodules, a file.
pub fn is_git_repo(root: &Path) -> bool {
    root.join(".git").exists()
}

/// Clone the template repository (URL or local path) into `dest`.
pub fn clone_template(url: &str, dest: &Path) -> Result<()> {
    info!(url, dest = %dest.display(), "cloning template repository");
    git2::build::RepoBuilder::new().clone(url, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn detects_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_git_repo(dir.path()));
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(is_git_repo(dir.path()));
    }

    #[test]
    fn detects_gitlink_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".git"), "gitdir: ../somewhere\n").unwrap();
        assert!(is_git_repo(dir.path()));
    }

    #[test]
    fn clones_local_template() {
        let tmp = tempfile::tempdir().unwrap();
        let template = tmp.path().join("template");
        let repo = git2::Repository::init(&template).unwrap();
        fs::write(template.join("a.txt"), "hello").unwrap();

        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
            .unwrap();

        let dest = tmp.path().join("clone");
        clone_template(template.to_str().unwrap(), &dest).unwrap();
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "hello");
    }
}
