//! Validators over a generated documentation directory.
//!
//! | Module | Checks |
//! |--------|--------|
//! | [`links`] | anchors resolve inside the namespace, headings and links agree |
//! | [`coverage`] | every documented entity has a section in `entities.md` |
//! | [`inventory`] | `index.json` counts match the store |

pub mod coverage;
pub mod inventory;
pub mod links;
