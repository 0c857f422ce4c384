//! Workspace root package. It carries the repository-wide pre-commit hook
//! configuration and has no code of its own.
