//! Analysis engine for determining version bumps from commits

pub mod commit_classifier;

pub use commit_classifier::CommitClassifier;
