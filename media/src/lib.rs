//! Media file resolution for the Whirligig demo.
//!
//! Demo assets are referenced by bare file names (`"sail_diffuse.png"`) and
//! located on disk by [`MediaResolver`], which probes a fixed, ordered set of
//! candidate directories derived from the working directory and the
//! executable location, retries everything under a `media/` subdirectory, and
//! finally walks parent directories toward the filesystem root.
//!
//! The probe order matches the conventional sample-project layouts the demo
//! assets ship in (binary in a `bin/` folder beside a project directory, a
//! shared `media/` folder a few levels up), so the order itself is part of
//! this crate's contract.

mod error;
mod resolver;

pub use error::MediaError;
pub use resolver::MediaResolver;
