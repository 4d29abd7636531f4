//! # Chunk World Entry Point
//!
//! Calls into the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- world.json
//! ```

fn main() {
    chunk_world::run();
}
