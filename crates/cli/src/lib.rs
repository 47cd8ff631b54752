//! Console demo: the scripted account tour behind the `minibank` binary.

pub mod scenario;
