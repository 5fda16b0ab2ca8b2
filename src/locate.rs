//! Artifact discovery.
//!
//! Where the shared library lands depends on the strategy that ran and, for
//! cargo-ndk, on the helper's version. The locator tries an ordered chain of
//! lookups, each returning an optional path:
//!
//! 1. The strategy's explicit candidate paths, in order
//! 2. A recursive search of the strategy's output root for the file name
//!
//! The first hit wins.

use std::path::{Path, PathBuf};

use crate::core::artifact::BuildOutcome;
use crate::core::config::BuildConfiguration;
use crate::error::BuildError;
use crate::toolchain::BuildStrategy;
use crate::util::fs::find_file_named;

/// Ordered paths to probe for the artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePathSet {
    paths: Vec<PathBuf>,
}

impl CandidatePathSet {
    pub fn new() -> Self {
        CandidatePathSet::default()
    }

    /// Append a candidate. Candidates are probed in insertion order.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// First candidate that is an existing file.
    pub fn first_existing(&self) -> Option<PathBuf> {
        self.iter().find(|path| path.is_file()).map(Path::to_path_buf)
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for CandidatePathSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        CandidatePathSet {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A step of the lookup chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStep {
    /// One of the strategy's explicit candidate paths existed.
    Candidate,
    /// Found by walking the search root.
    RecursiveSearch,
}

impl LookupStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStep::Candidate => "candidate paths",
            LookupStep::RecursiveSearch => "recursive search",
        }
    }
}

type Lookup = fn(&ArtifactLocator) -> Option<PathBuf>;

/// Lookup steps, most specific first.
const LOOKUP_CHAIN: &[(LookupStep, Lookup)] = &[
    (LookupStep::Candidate, ArtifactLocator::probe_candidates),
    (LookupStep::RecursiveSearch, ArtifactLocator::search_recursively),
];

/// An artifact and the lookup step that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedArtifact {
    pub path: PathBuf,
    pub found_by: LookupStep,
}

/// Finds the compiled artifact on disk.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    candidates: CandidatePathSet,
    search_root: PathBuf,
    file_name: String,
}

impl ArtifactLocator {
    pub fn new(
        candidates: CandidatePathSet,
        search_root: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        ArtifactLocator {
            candidates,
            search_root: search_root.into(),
            file_name: file_name.into(),
        }
    }

    /// Locator using `strategy`'s output conventions.
    pub fn for_strategy(strategy: &BuildStrategy, config: &BuildConfiguration) -> Self {
        ArtifactLocator::new(
            strategy.candidate_paths(config),
            strategy.search_root(config),
            config.artifact_name(),
        )
    }

    pub fn candidates(&self) -> &CandidatePathSet {
        &self.candidates
    }

    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Run the lookup chain and report the first match.
    pub fn locate(&self) -> BuildOutcome {
        self.find().map(|found| found.path).into()
    }

    /// Like [`ArtifactLocator::locate`], also naming the step that matched.
    pub fn find(&self) -> Option<LocatedArtifact> {
        LOOKUP_CHAIN.iter().find_map(|(step, lookup)| {
            let path = lookup(self)?;
            tracing::debug!("{} found {}", step.as_str(), path.display());
            Some(LocatedArtifact {
                path,
                found_by: *step,
            })
        })
    }

    /// Like [`ArtifactLocator::find`], but a miss is an error.
    pub fn require(&self) -> Result<LocatedArtifact, BuildError> {
        self.find()
            .ok_or_else(|| BuildError::ArtifactNotFound {
                file_name: self.file_name.clone(),
                search_root: self.search_root.clone(),
                candidates: self.candidates.iter().map(Path::to_path_buf).collect(),
            })
    }

    fn probe_candidates(&self) -> Option<PathBuf> {
        for candidate in self.candidates.iter() {
            tracing::debug!("probing {}", candidate.display());
        }
        self.candidates.first_existing()
    }

    fn search_recursively(&self) -> Option<PathBuf> {
        tracing::debug!(
            "searching {} for {}",
            self.search_root.display(),
            self.file_name
        );
        find_file_named(&self.search_root, &self.file_name)
    }
}
