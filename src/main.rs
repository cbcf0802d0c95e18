use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use quire::config::{self, SiteConfig};
use quire::post::{self, Post};
use quire::{feed, render, theme};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Render themed blog pages and an Atom feed")]
struct Cli {
    /// Site config file. Defaults to the nearest `quire.yaml`, then to the
    /// built-in settings.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every theme.
    Themes,

    /// Print the theme each slug is filed under.
    Resolve {
        #[arg(required = true)]
        slugs: Vec<String>,
    },

    /// Render the Atom feed for the posts in a manifest.
    Feed {
        manifest: PathBuf,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render one post from a manifest, selected by its path.
    Post {
        manifest: PathBuf,
        path: String,

        /// Make the article editable so the browser spell-checks it.
        #[arg(long)]
        spellcheck: bool,
    },
}

fn main() {
    Builder::from_env(Env::default().filter_or("RUST_LOG", "info")).init();

    if let Err(err) = run(Cli::parse()) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Themes => {
            for theme in theme::themes() {
                println!("{:<12} {:<32} {}", theme.key, theme.title, theme.path);
            }
        }
        Command::Resolve { slugs } => {
            for slug in slugs {
                let theme = theme::resolve_theme(&slug);
                println!("{} {}", slug, theme.key);
            }
        }
        Command::Feed { manifest, output } => {
            let site = load_config(cli.config.as_deref())?;
            let posts = post::load_manifest(&manifest)?;
            let xml = feed::feed(&site, &posts)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, xml).map_err(|err| Error::Write {
                        path: path.clone(),
                        err,
                    })?;
                    log::info!("wrote feed to `{}`", path.display());
                }
                None => print!("{}", xml),
            }
        }
        Command::Post {
            manifest,
            path,
            spellcheck,
        } => {
            let site = load_config(cli.config.as_deref())?;
            let posts = post::load_manifest(&manifest)?;
            let post: &Post = posts
                .iter()
                .find(|post| post.path == path)
                .ok_or_else(|| Error::PostNotFound(path.clone()))?;
            println!("{}", render::post(&site, post, spellcheck).into_string());
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    if let Some(path) = path {
        return Ok(SiteConfig::from_file(path)?);
    }
    let cwd = std::env::current_dir().map_err(Error::Io)?;
    match SiteConfig::discover(&cwd)? {
        Some(config) => Ok(config),
        None => {
            log::info!(
                "no `{}` found; using built-in site settings",
                config::CONFIG_FILE_NAME
            );
            Ok(SiteConfig::default())
        }
    }
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
enum Error {
    Config(config::Error),
    Manifest(post::Error),
    Feed(feed::Error),
    PostNotFound(String),
    Write { path: PathBuf, err: std::io::Error },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => err.fmt(f),
            Error::Manifest(err) => err.fmt(f),
            Error::Feed(err) => err.fmt(f),
            Error::PostNotFound(path) => write!(f, "No post with path `{}` in manifest", path),
            Error::Write { path, err } => {
                write!(f, "Writing `{}`: {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Manifest(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::PostNotFound(_) => None,
            Error::Write { path: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<config::Error> for Error {
    fn from(err: config::Error) -> Error {
        Error::Config(err)
    }
}

impl From<post::Error> for Error {
    fn from(err: post::Error) -> Error {
        Error::Manifest(err)
    }
}

impl From<feed::Error> for Error {
    fn from(err: feed::Error) -> Error {
        Error::Feed(err)
    }
}
