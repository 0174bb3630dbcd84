//! Chess rules core built around the [10x12 Mailbox] board representation:
//! piece placement and capture bookkeeping, pseudo-legal move generation and
//! check detection. The [`Engine`] exposes it through a line-based text
//! protocol.
//!
//! [10x12 Mailbox]: https://www.chessprogramming.org/10x12_Board

pub mod chess;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the engine version on startup.
pub fn print_engine_info() {
    println!("{} {}", build::PROJECT_NAME, engine_version());
}

/// Prints the build type and whether the build is clean on startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
