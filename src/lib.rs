// Library target: the listbox interaction core plus the configuration and
// option-list loading the terminal host shares with benches and tests.
// The binary entry point is main.rs and owns all terminal rendering.

pub mod config;
pub mod listbox;
pub mod options;
