//! Git integration module.
//!
//! Repository setup and commits for generated startup documents.

use std::path::{Path, PathBuf};

use git2::{Commit, Oid, Repository};

/// Git repository wrapper with high-level operations.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open a Git repository from the given path.
    ///
    /// This will search up the directory tree to find a Git repository.
    #[must_use]
    pub fn discover(path: impl AsRef<Path>) -> Option<Self> {
        Repository::discover(path.as_ref()).ok().map(|repo| Self { repo })
    }

    /// Open a Git repository at the exact path.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        Repository::open(path.as_ref()).ok().map(|repo| Self { repo })
    }

    /// Open the repository at `path`, initialising one if none exists there.
    ///
    /// Returns the repository and whether it was newly created.
    pub fn init_or_open(path: impl AsRef<Path>) -> Result<(Self, bool), git2::Error> {
        let path = path.as_ref();
        if let Some(existing) = Self::open(path) {
            return Ok((existing, false));
        }
        let repo = Repository::init(path)?;
        tracing::debug!(path = %path.display(), "Initialised git repository");
        Ok((Self { repo }, true))
    }

    /// Summary line of the HEAD commit.
    #[must_use]
    pub fn head_summary(&self) -> Option<String> {
        let commit = self.repo.head().ok()?.peel_to_commit().ok()?;
        commit.summary().map(String::from)
    }

    /// Stage `paths` and commit them on top of HEAD.
    ///
    /// Paths may be absolute or relative to the repository root. Requires a
    /// configured `user.name` / `user.email`.
    pub fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<Oid, git2::Error> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("cannot commit in a bare repository"))?;
        let workdir = workdir.canonicalize().unwrap_or_else(|_| workdir.to_path_buf());

        let mut index = self.repo.index()?;
        for path in paths {
            let relative = relative_to(&workdir, path).ok_or_else(|| {
                git2::Error::from_str(&format!("{} is outside the repository", path.display()))
            })?;
            index.add_path(&relative)?;
        }
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        tracing::debug!(%oid, files = paths.len(), "Created commit");
        Ok(oid)
    }
}

fn relative_to(workdir: &Path, path: &Path) -> Option<PathBuf> {
    if path.is_relative() {
        return Some(path.to_path_buf());
    }
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    path.strip_prefix(workdir).ok().map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn configured_repo() -> (TempDir, GitRepository) {
        let temp = TempDir::new().unwrap();
        let (repo, created) = GitRepository::init_or_open(temp.path()).unwrap();
        assert!(created);
        let mut config = repo.repo.config().unwrap();
        config.set_str("user.name", "Test Founder").unwrap();
        config.set_str("user.email", "founder@example.com").unwrap();
        (temp, repo)
    }

    #[test]
    fn test_discover_nonexistent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("not-a-repo");
        fs::create_dir_all(&nested).unwrap();
        assert!(GitRepository::open(&nested).is_none());
    }

    #[test]
    fn test_init_or_open_reuses_existing() {
        let (temp, _repo) = configured_repo();
        let (_again, created) = GitRepository::init_or_open(temp.path()).unwrap();
        assert!(!created);
    }

    #[test]
    fn test_commit_paths_creates_history() {
        let (temp, repo) = configured_repo();
        fs::write(temp.path().join("README.md"), "# Acme").unwrap();
        fs::write(temp.path().join(".gitignore"), ".env\n").unwrap();

        repo.commit_paths(
            &[temp.path().join("README.md"), PathBuf::from(".gitignore")],
            "Initial commit: Setup Acme with Startup CLI",
        )
        .unwrap();
        assert_eq!(repo.head_summary().as_deref(), Some("Initial commit: Setup Acme with Startup CLI"));

        fs::create_dir_all(temp.path().join("problem")).unwrap();
        fs::write(temp.path().join("problem/problem.md"), "# Problem").unwrap();
        repo.commit_paths(&[temp.path().join("problem/problem.md")], "Add problem definition").unwrap();

        let head = repo.repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.parent_count(), 1);
        assert!(head.tree().unwrap().get_path(Path::new("problem/problem.md")).is_ok());
    }

    #[test]
    fn test_commit_rejects_outside_path() {
        let (_temp, repo) = configured_repo();
        let outside = TempDir::new().unwrap();
        let file = outside.path().join("stray.md");
        fs::write(&file, "x").unwrap();

        assert!(repo.commit_paths(&[file], "nope").is_err());
    }
}
