//! Page classification.
//!
//! Before anything is extracted the fetched markup is classified into a
//! [`PageType`]. Classification never fails: unsupported pages are a typed
//! result the caller has to branch on.

pub mod classify;

pub use classify::{classify, PageType};
