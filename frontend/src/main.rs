// The wasm module boots through the library's `start` entry point; this
// binary exists only so `cargo build` on the host has a target.
fn main() {}
