//! Support for creating the site's Atom feed from a list of posts.

use crate::config::{Author, SiteConfig};
use crate::post::Post;
use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, Error as AtomError, Feed, FeedBuilder, FixedDateTime,
    LinkBuilder, Person, PersonBuilder, Text, WriteConfig,
};
use chrono::{NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::string::FromUtf8Error;

/// The feed carries at most this many entries.
pub const FEED_LIMIT: usize = 10;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Renders the Atom feed for `posts`, stamped with the current time. Only the
/// first [`FEED_LIMIT`] posts are included, in the order given, so callers
/// should pass posts newest-first.
pub fn feed(site: &SiteConfig, posts: &[Post]) -> Result<String> {
    feed_at(site, posts, Utc::now().into())
}

/// Like [`feed`], but with an explicit `updated` timestamp.
pub fn feed_at(site: &SiteConfig, posts: &[Post], updated: FixedDateTime) -> Result<String> {
    let feed = build_feed(site, posts, updated);
    log::debug!("writing feed with {} entries", feed.entries().len());
    let out = feed.write_with_config(
        XML_DECLARATION.as_bytes().to_vec(),
        WriteConfig {
            write_document_declaration: false,
            indent_size: None,
        },
    )?;
    Ok(String::from_utf8(out)?)
}

fn build_feed(site: &SiteConfig, posts: &[Post], updated: FixedDateTime) -> Feed {
    FeedBuilder::default()
        .title(Text::html(site.title.clone()))
        .id(site.feed_url())
        .updated(updated)
        .subtitle(Some(Text::plain(site.description.clone())))
        .authors(vec![person(&site.author)])
        .links(vec![
            LinkBuilder::default()
                .href(site.feed_url())
                .rel("self")
                .mime_type(Some("application/atom+xml".to_owned()))
                .build(),
            LinkBuilder::default()
                .href(site.absolute(""))
                .rel("alternate")
                .mime_type(Some("text/html".to_owned()))
                .build(),
        ])
        .entries(
            posts
                .iter()
                .take(FEED_LIMIT)
                .map(|post| feed_entry(site, post))
                .collect::<Vec<Entry>>(),
        )
        .build()
}

/// Converts a single [`Post`] into a feed [`Entry`]. The post's date is used
/// as both its published and updated time, at midnight UTC.
pub fn feed_entry(site: &SiteConfig, post: &Post) -> Entry {
    let url = site.absolute(&post.path);
    let date: FixedDateTime = Utc
        .from_utc_datetime(&NaiveDateTime::new(post.date, NaiveTime::MIN))
        .into();

    EntryBuilder::default()
        .title(Text::plain(post.title.clone()))
        .id(site.absolute(&post.path.replacen(".html", "", 1)))
        .updated(date)
        .published(Some(date))
        .authors(vec![person(&site.author)])
        .links(vec![LinkBuilder::default()
            .href(url.clone())
            .rel("alternate")
            .mime_type(Some("text/html".to_owned()))
            .title(Some(post.title.clone()))
            .build()])
        .summary(Some(Text::html(post.summary.clone())))
        .content(Some(
            ContentBuilder::default()
                .value(Some(post.content.clone()))
                .content_type(Some("html".to_owned()))
                .base(Some(url))
                .build(),
        ))
        .build()
}

/// Feed authors carry only a name; the email stays on the site's footer.
fn person(author: &Author) -> Person {
    PersonBuilder::default().name(author.name.clone()).build()
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem serializing the feed.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is an Atom-related error.
    Atom(AtomError),

    /// Returned when the serialized feed isn't valid UTF-8.
    Utf8(FromUtf8Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Atom(err) => err.fmt(f),
            Error::Utf8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Atom(err) => Some(err),
            Error::Utf8(err) => Some(err),
        }
    }
}

impl From<AtomError> for Error {
    /// Converts [`AtomError`]s into [`Error`]. This allows us to use the `?`
    /// operator in fallible feed operations.
    fn from(err: AtomError) -> Error {
        Error::Atom(err)
    }
}

impl From<FromUtf8Error> for Error {
    /// Converts [`FromUtf8Error`]s into [`Error`]. This allows us to use the
    /// `?` operator in fallible feed operations.
    fn from(err: FromUtf8Error) -> Error {
        Error::Utf8(err)
    }
}
