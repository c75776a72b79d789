//! Unit test tree for the codex data layer.

mod support;
