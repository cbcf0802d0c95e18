//! Site-wide settings shared by every rendered page and the feed. These are
//! read from a `quire.yaml` file; any field the file leaves out keeps the
//! value from [`SiteConfig::default`].

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The file name [`SiteConfig::discover`] looks for.
pub const CONFIG_FILE_NAME: &str = "quire.yaml";

const DEFAULT_URL: &str = "https://mbottoni.github.io";

/// The author credited in the feed.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,
}

/// A header navigation link.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// The absolute URL the site is served from. Site-relative paths are
    /// appended to it verbatim, so it should not carry a path of its own.
    pub url: Url,

    /// Used for the header link, the home page `<title>` and the feed title.
    pub title: String,

    /// The blurb used as the home page description and the feed subtitle.
    pub description: String,

    pub author: Author,

    /// GitHub user name linked from the footer.
    pub github: String,

    /// Prefix for the footer's "Fix typo" link; a page's source path is
    /// appended to it.
    pub edit_base: String,

    /// Site-relative path of the Atom feed.
    pub feed_path: String,

    pub nav: Vec<NavLink>,

    /// Extra stylesheets (relative to `/css/`) for standalone pages, keyed by
    /// page name.
    pub page_styles: BTreeMap<String, String>,

    /// Source path reported by the listing pages' edit links.
    pub templates_src: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            url: Url::parse(DEFAULT_URL).expect("DEFAULT_URL is a valid URL"),
            title: "mbottoni".to_owned(),
            description: "Yet another programming blog by Maruan Bakri Ottoni aka mbottoni."
                .to_owned(),
            author: Author {
                name: "Maruan Bakri Ottoni".to_owned(),
                email: Some("maruanbakriottoni@gmail.com".to_owned()),
            },
            github: "mbottoni".to_owned(),
            edit_base: "https://github.com/mbottoni/mbottoni.github.io/edit/master".to_owned(),
            feed_path: "/feed.xml".to_owned(),
            nav: vec![
                NavLink {
                    label: "About".to_owned(),
                    href: "/about.html".to_owned(),
                },
                NavLink {
                    label: "Resume".to_owned(),
                    href: "/resume.html".to_owned(),
                },
                NavLink {
                    label: "Links".to_owned(),
                    href: "/links.html".to_owned(),
                },
            ],
            page_styles: BTreeMap::from([("resume".to_owned(), "resume.css".to_owned())]),
            templates_src: "/src/render.rs".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Joins a site-relative `path` onto the site URL. `path` is appended as
    /// is, so `""` yields the bare site URL.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.url.as_str().trim_end_matches('/'), path)
    }

    /// The absolute URL of the Atom feed.
    pub fn feed_url(&self) -> String {
        self.absolute(&self.feed_path)
    }

    /// Loads a [`SiteConfig`] from a YAML file.
    pub fn from_file(path: &Path) -> Result<SiteConfig> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        serde_yaml::from_reader(file).map_err(|err| Error::Parse {
            path: path.to_owned(),
            err,
        })
    }

    /// Looks for [`CONFIG_FILE_NAME`] in `dir` and then in each of its
    /// ancestors, loading the first one found. Returns `Ok(None)` when no
    /// directory up to the root has one.
    pub fn discover(dir: &Path) -> Result<Option<SiteConfig>> {
        let mut current = Some(dir);
        while let Some(dir) = current {
            let path = dir.join(CONFIG_FILE_NAME);
            if path.is_file() {
                log::debug!("loading site config from `{}`", path.display());
                return SiteConfig::from_file(&path).map(Some);
            }
            current = dir.parent();
        }
        Ok(None)
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading a [`SiteConfig`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the config file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the config file isn't valid YAML or doesn't match the
    /// [`SiteConfig`] schema.
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
                write!(f, "Opening config file `{}`: {}", path.display(), err)
            }
            Error::Parse { path, err } => {
                write!(f, "Parsing config file `{}`: {}", path.display(), err)
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

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_absolute_joins_without_double_slash() {
        let config = SiteConfig::default();
        assert_eq!(
            "https://mbottoni.github.io/themes/frontier.html",
            config.absolute("/themes/frontier.html")
        );
        assert_eq!("https://mbottoni.github.io", config.absolute(""));
        assert_eq!("https://mbottoni.github.io/feed.xml", config.feed_url());
    }

    #[test]
    fn test_from_file_overrides_only_given_fields() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&path)?;
        writeln!(file, "url: https://example.org")?;
        writeln!(file, "title: example")?;
        writeln!(file, "author:")?;
        writeln!(file, "  name: Jane Doe")?;
        drop(file);

        let config = SiteConfig::from_file(&path)?;
        assert_eq!("example", config.title);
        assert_eq!("https://example.org/feed.xml", config.feed_url());
        assert_eq!(None, config.author.email);
        assert_eq!(SiteConfig::default().nav, config.nav);
        assert_eq!(SiteConfig::default().description, config.description);
        Ok(())
    }

    #[test]
    fn test_discover_searches_ancestors() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "title: found\n")?;
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested)?;

        let config = SiteConfig::discover(&nested)?;
        assert_eq!(Some("found".to_owned()), config.map(|c| c.title));
        Ok(())
    }

    #[test]
    fn test_from_file_reports_path() {
        let err = SiteConfig::from_file(Path::new("/does/not/exist.yaml")).unwrap_err();
        assert!(err.to_string().contains("/does/not/exist.yaml"));
    }

    #[test]
    fn test_from_file_rejects_bad_url() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "url: not a url\n")?;
        assert!(matches!(
            SiteConfig::from_file(&path),
            Err(Error::Parse { .. })
        ));
        Ok(())
    }
}
