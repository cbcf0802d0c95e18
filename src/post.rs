//! Defines the [`Post`] and [`ThemeGroup`] types. Posts are produced by an
//! external content loader; the renderer only reads them. For callers that
//! keep their post metadata in a YAML manifest, [`PostSource`] and
//! [`load_manifest`] turn manifest records into [`Post`]s.

use crate::theme::{resolve_theme, themes, ThemeConfig};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A blog post ready to be rendered.
#[derive(Clone, Debug)]
pub struct Post {
    pub title: String,

    /// A short plain-text description shown in listings and the feed.
    pub summary: String,

    pub date: NaiveDate,

    /// The site-relative URL of the rendered post, e.g.
    /// `/2024/03/05/diffusion.html`.
    pub path: String,

    /// The repository-relative path of the post's source file, used for the
    /// footer's edit link.
    pub src: String,

    /// An optional preview image shown on theme pages.
    pub image: Option<String>,

    pub theme: &'static ThemeConfig,

    /// The post body, already rendered to HTML. It is emitted without
    /// escaping.
    pub content: String,
}

/// A post as it appears in a manifest file. The theme isn't stored; it's
/// derived from `slug` when converting into a [`Post`].
#[derive(Clone, Debug, Deserialize)]
pub struct PostSource {
    pub slug: String,
    pub title: String,

    #[serde(default)]
    pub summary: String,

    pub date: NaiveDate,
    pub path: String,

    #[serde(default)]
    pub src: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub content: String,
}

impl From<PostSource> for Post {
    fn from(source: PostSource) -> Post {
        Post {
            theme: resolve_theme(&source.slug),
            title: source.title,
            summary: source.summary,
            date: source.date,
            path: source.path,
            src: source.src,
            image: source.image,
            content: source.content,
        }
    }
}

/// Reads a YAML sequence of [`PostSource`] records and converts them into
/// [`Post`]s, preserving the order of the file.
pub fn load_manifest(path: &Path) -> Result<Vec<Post>> {
    let file = File::open(path).map_err(|err| Error::Open {
        path: path.to_owned(),
        err,
    })?;
    let sources: Vec<PostSource> = serde_yaml::from_reader(file).map_err(|err| Error::Parse {
        path: path.to_owned(),
        err,
    })?;
    log::debug!("loaded {} posts from `{}`", sources.len(), path.display());
    Ok(sources.into_iter().map(Post::from).collect())
}

/// A theme together with the posts filed under it.
#[derive(Debug)]
pub struct ThemeGroup<'a> {
    pub theme: &'static ThemeConfig,

    /// The theme's posts, in the order the caller supplied them. Callers
    /// typically sort newest-first so the first post is the latest.
    pub posts: Vec<&'a Post>,
}

/// Groups `posts` by theme. Groups follow the order of
/// [`crate::theme::THEMES`]; themes without posts are left out.
pub fn group_by_theme(posts: &[Post]) -> Vec<ThemeGroup<'_>> {
    themes()
        .iter()
        .map(|theme| ThemeGroup {
            theme,
            posts: posts
                .iter()
                .filter(|post| post.theme.key == theme.key)
                .collect(),
        })
        .filter(|group| !group.posts.is_empty())
        .collect()
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem reading a post manifest.
#[derive(Debug)]
pub enum Error {
    /// Returned when the manifest can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the manifest isn't a YAML list of post records.
    Parse {
        path: PathBuf,
        err: serde_yaml::Error,
    },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening manifest `{}`: {}", path.display(), err)
            }
            Error::Parse { path, err } => {
                write!(f, "Parsing manifest `{}`: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Parse { path: _, err } => Some(err),
        }
    }
}
