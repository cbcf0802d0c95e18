//! The library code for `quire`, which turns already-loaded blog posts into a
//! themed static site. The work breaks down into two steps:
//!
//! 1. Filing each post under a theme ([`crate::theme`]). Posts carry a short
//!    slug; a fixed assignment table maps slugs to one of a closed set of
//!    themes, and anything unassigned falls back to a default theme.
//! 2. Rendering ([`crate::render`] and [`crate::feed`]). Pages are composed
//!    from HTML fragments around a shared layout: the home page lists one card
//!    per theme, each theme gets a listing page, and each post gets its own
//!    page. The Atom feed carries the ten most recent posts.
//!
//! Site-wide values (URL, title, author, navigation) come from
//! [`crate::config::SiteConfig`]. Loading and ordering posts is the caller's
//! job; [`crate::post::load_manifest`] covers the simple case of a YAML list.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod config;
pub mod feed;
pub mod post;
pub mod render;
pub mod theme;
