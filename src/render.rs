//! Composes the site's HTML pages. Every function here is pure: it takes the
//! site configuration and already-loaded posts and returns [`Markup`].
//!
//! Interpolated values go through [`maud`]'s escaping, so text from posts and
//! themes can never inject markup. The only unescaped inputs are
//! [`Post::content`], which is pre-rendered HTML, and the fixed stylesheet and
//! icon fragments defined in this module.

use crate::config::SiteConfig;
use crate::post::{Post, ThemeGroup};
use crate::theme::ThemeConfig;
use chrono::NaiveDate;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const INLINE_STYLE: &str = r#"
  @font-face {
    font-family: 'Open Sans'; src: url('/css/OpenSans-300-Normal.woff2') format('woff2');
    font-weight: 300; font-style: normal;
  }
  @font-face {
    font-family: 'JetBrains Mono'; src: url('/css/JetBrainsMono-400-Normal.woff2') format('woff2');
    font-weight: 400; font-style: normal;
  }
  @font-face {
    font-family: 'JetBrains Mono'; src: url('/css/JetBrainsMono-700-Normal.woff2') format('woff2');
    font-weight: 700; font-style: normal;
  }
  @font-face {
    font-family: 'EB Garamond'; src: url('/css/EBGaramond-400-Normal.woff2') format('woff2');
    font-weight: 400; font-style: normal;
  }
  @font-face {
    font-family: 'EB Garamond'; src: url('/css/EBGaramond-400-Italic.woff2') format('woff2');
    font-weight: 400; font-style: italic;
  }
  @font-face {
    font-family: 'EB Garamond'; src: url('/css/EBGaramond-700-Normal.woff2') format('woff2');
    font-weight: 700; font-style: normal;
  }
  @font-face {
    font-family: 'EB Garamond'; src: url('/css/EBGaramond-700-Italic.woff2') format('woff2');
    font-weight: 700; font-style: italic;
  }

  * { box-sizing: border-box; margin: 0; padding: 0; margin-block-start: 0; margin-block-end: 0; }

  body { max-width: 80ch; padding: 2ch; margin-left: auto; margin-right: auto; }

  header { margin-bottom: 2rem; }
  header > nav { display: flex; column-gap: 2ch; align-items: baseline; flex-wrap: wrap; }
  header a { font-style: normal; color: rgba(0, 0, 0, .8); text-decoration: none; }
  header a:hover { color: rgba(0, 0, 0, .8); text-decoration: underline; }
  header .title { font-size: 1.25em; flex-grow: 2; }

  footer { margin-top: 2rem; }
  footer > p { display: flex; column-gap: 2ch; justify-content: center; flex-wrap: wrap; }
  footer a { color: rgba(0, 0, 0, .8); text-decoration: none; white-space: nowrap; }
  footer i { vertical-align: middle; color: rgba(0, 0, 0, .8) }

  .theme-grid { display: grid; gap: 2rem; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); }
  .theme-card { border: 1px solid rgba(0,0,0,.12); border-radius: 1rem; padding: 1.5rem; display: flex; flex-direction: column; gap: .75rem; }
  .theme-card h2 { font-size: 1.35em; }
  .theme-card h2 a { text-decoration: none; color: #b32f1c; }
  .theme-card h2 a:hover { text-decoration: underline; }
  .theme-card p { color: rgba(0,0,0,.75); line-height: 1.5; }
  .theme-meta { font-size: .85em; color: rgba(0,0,0,.6); }

  .theme-page header h1 { font-size: 2em; margin-bottom: .5rem; }
  .theme-page header p { color: rgba(0,0,0,.65); line-height: 1.5; }
  .theme-page { display: flex; flex-direction: column; gap: 1.5rem; }

  .post-list { list-style: none; display: flex; flex-direction: column; gap: 1.5rem; padding: 0; }
  .post-card { display: grid; gap: 1rem; grid-template-columns: minmax(0, 1fr); }
  .post-card__media { display: none; }
  .post-card__body h3 { font-size: 1.1em; margin-bottom: .35rem; }
  .post-card__body p { color: rgba(0, 0, 0, .7); }
  .post-card__media a { display: block; border-radius: .75rem; overflow: hidden; }
  .post-card__media img { width: 100%; height: 100%; object-fit: cover; display: block; }
  @media (min-width: 720px) {
    .post-card { grid-template-columns: 260px 1fr; align-items: center; }
    .post-card__media { display: block; min-height: 160px; }
    .post-card__media:empty { display: block; }
  }

  .theme-pill, .theme-banner a { display: inline-flex; align-items: center; gap: .4rem; font-size: .8em; text-transform: uppercase; letter-spacing: .08em; border: 1px solid rgba(0, 0, 0, .15); border-radius: 999px; padding: .25rem .9rem; text-decoration: none; color: rgba(0, 0, 0, .7); }
  .theme-pill svg, .theme-banner svg { width: .75em; height: .75em; }
  .theme-banner { margin-bottom: 1rem; }
  .theme-banner span { font-size: .8em; color: rgba(0, 0, 0, .6); margin-right: .5rem; }
"#;

/// The per-page inputs to [`base`].
pub struct Layout<'a> {
    pub content: Markup,

    /// Repository path of the page's source, appended to the edit link.
    pub src: &'a str,

    pub title: &'a str,
    pub description: &'a str,

    /// Site-relative path of the page, used for the canonical link.
    pub path: &'a str,

    /// Optional stylesheet under `/css/`.
    pub extra_css: Option<&'a str>,
}

fn icon(name: &'static str) -> Markup {
    PreEscaped(format!(
        r#"<svg class="icon"><use href="/assets/icons.svg#{}"/></svg>"#,
        name
    ))
}

/// The page shell shared by every HTML page: head, header navigation, main
/// content and footer.
pub fn base(site: &SiteConfig, layout: Layout) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en-US" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (layout.title) }
                meta name="description" content=(layout.description);
                link rel="icon" href="/favicon.png" type="image/png";
                link rel="icon" href="/favicon.svg" type="image/svg+xml";
                link rel="canonical" href=(site.absolute(layout.path));
                link rel="alternate" type="application/rss+xml" title=(site.title) href=(site.feed_url());
                style { (PreEscaped(INLINE_STYLE)) }
                link rel="stylesheet" href="/css/main.css";
                @if let Some(css) = layout.extra_css {
                    link rel="stylesheet" href={ "/css/" (css) };
                }
            }
            body {
                header {
                    nav {
                        a class="title" href="/" { (site.title) }
                        @for link in &site.nav {
                            a href=(link.href) { (link.label) }
                        }
                    }
                }
                main {
                    (layout.content)
                }
                footer class="site-footer" {
                    p {
                        a href={ (site.edit_base) (layout.src) } {
                            (icon("edit")) "Fix typo"
                        }
                        a href=(site.feed_path) {
                            (icon("rss")) "Subscribe"
                        }
                        @if let Some(email) = &site.author.email {
                            a href={ "mailto:" (email) } {
                                (icon("email")) "Get in touch"
                            }
                        }
                        a href={ "https://github.com/" (site.github) } {
                            (icon("github")) (site.github)
                        }
                    }
                }
            }
        }
    }
}

/// Renders a standalone content page such as `about` or `resume`. `content`
/// is the page body, already rendered.
pub fn page(site: &SiteConfig, name: &str, content: Markup) -> Markup {
    let path = format!("/{}", name);
    let src = format!("/content/{}.dj", name);
    base(
        site,
        Layout {
            content,
            src: &src,
            title: &site.title,
            description: &site.description,
            path: &path,
            extra_css: site.page_styles.get(name).map(String::as_str),
        },
    )
}

/// Renders the home page: one card per theme group with its post count and
/// the date of its first (latest) post.
pub fn post_list(site: &SiteConfig, groups: &[ThemeGroup]) -> Markup {
    let content = html! {
        section class="theme-grid" {
            @for group in groups {
                article class="theme-card" {
                    div {
                        h2 { a href=(group.theme.path) { (group.theme.title) } }
                        p { (group.theme.description) }
                    }
                    p class="theme-meta" {
                        (group.posts.len()) " post" @if group.posts.len() != 1 { "s" }
                        @if let Some(latest) = group.posts.first() {
                            " · Latest: " (time(latest.date))
                        }
                    }
                }
            }
        }
    };

    base(
        site,
        Layout {
            content,
            src: &site.templates_src,
            title: &site.title,
            description: &site.description,
            path: "",
            extra_css: None,
        },
    )
}

/// Renders a theme's listing page.
pub fn theme_page(site: &SiteConfig, theme: &ThemeConfig, posts: &[&Post]) -> Markup {
    let content = html! {
        section class="theme-page" {
            header class="theme-section" {
                h1 { (theme.title) }
                p { (theme.description) }
            }
            ul class="post-list" {
                @for post in posts {
                    li class="post-card" {
                        div class="post-card__media" {
                            @if let Some(image) = &post.image {
                                a href=(post.path) {
                                    img src=(image) alt={ (post.title) " preview" };
                                }
                            }
                        }
                        div class="post-card__body" {
                            h3 { (time(post.date)) " · " a href=(post.path) { (post.title) } }
                            p { (post.summary) }
                        }
                    }
                }
            }
        }
    };
    let title = format!("{} — {}", theme.title, site.title);

    base(
        site,
        Layout {
            content,
            src: &site.templates_src,
            title: &title,
            description: theme.description,
            path: theme.path,
            extra_css: None,
        },
    )
}

/// Renders a single post page. With `spellcheck` set the article is made
/// editable so the browser's spell checker underlines it.
pub fn post(site: &SiteConfig, post: &Post, spellcheck: bool) -> Markup {
    let content = html! {
        div class="theme-banner" {
            span { "Filed under" }
            a class="theme-pill" href=(post.theme.path) {
                (post.theme.title)
            }
        }
        article contenteditable=[spellcheck.then_some("true")] {
            "\n" (PreEscaped(&post.content))
        }
    };

    base(
        site,
        Layout {
            content,
            src: &post.src,
            title: &post.title,
            description: &post.summary,
            path: &post.path,
            extra_css: None,
        },
    )
}

/// Renders a `<time>` element, e.g.
/// `<time datetime="2024-03-05">Mar 5, 2024</time>`.
pub fn time(date: NaiveDate) -> Markup {
    html! {
        time datetime=(date.format("%Y-%m-%d").to_string()) { (date.format("%b %-d, %Y").to_string()) }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::group_by_theme;
    use crate::post::test::fixture;
    use crate::theme::{default_theme, resolve_theme, theme, ThemeKey};
    use pretty_assertions::assert_eq;

    fn hostile_post() -> Post {
        let mut post = fixture("diffusion", "Scores <b>& Noise</b>", "2024-03-05");
        post.summary = "x < y && y > z".to_owned();
        post.image = Some("/img/a.png?x=1&y=<2>".to_owned());
        post.path = "/diffusion.html?a=1&b=2".to_owned();
        post.content = "<p>pre <em>rendered</em> &amp; kept</p>".to_owned();
        post
    }

    #[test]
    fn test_time() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            r#"<time datetime="2024-03-05">Mar 5, 2024</time>"#,
            time(date).into_string()
        );
    }

    #[test]
    fn test_post_names_theme_once() {
        let site = SiteConfig::default();
        let kalman = fixture("kalman", "Kalman filters", "2023-06-01");
        let html = post(&site, &kalman, false).into_string();

        let theme = theme(ThemeKey::Foundations);
        assert_eq!(1, html.matches(theme.path).count());
        assert_eq!(1, html.matches("Math, Physics &amp; Foundations").count());
        assert!(!html.contains("contenteditable"));
        assert!(html.contains("<p>Kalman filters</p>"));
    }

    #[test]
    fn test_post_spellcheck_makes_article_editable() {
        let site = SiteConfig::default();
        let kalman = fixture("kalman", "Kalman filters", "2023-06-01");
        let html = post(&site, &kalman, true).into_string();
        assert!(html.contains(r#"<article contenteditable="true">"#));
    }

    #[test]
    fn test_post_escapes_fields() {
        let site = SiteConfig::default();
        let html = post(&site, &hostile_post(), false).into_string();

        assert!(!html.contains("<b>& Noise</b>"));
        assert!(html.contains("<title>Scores &lt;b&gt;&amp; Noise&lt;/b&gt;</title>"));
        assert!(!html.contains("x < y && y > z"));
        assert!(html.contains("x &lt; y &amp;&amp; y &gt; z"));
        assert!(html.contains("/diffusion.html?a=1&amp;b=2"));
        // pre-rendered content is passed through untouched
        assert!(html.contains("<p>pre <em>rendered</em> &amp; kept</p>"));
    }

    #[test]
    fn test_post_links_edit_source_and_canonical() {
        let site = SiteConfig::default();
        let rag = fixture("rag", "RAG", "2024-01-01");
        let html = post(&site, &rag, false).into_string();
        assert!(html.contains(
            r#"href="https://github.com/mbottoni/mbottoni.github.io/edit/master/content/posts/rag.dj""#
        ));
        assert!(html.contains(r#"<link rel="canonical" href="https://mbottoni.github.io/rag.html">"#));
    }

    #[test]
    fn test_theme_page_escapes_fields() {
        let site = SiteConfig::default();
        let hostile = hostile_post();
        let html = theme_page(&site, hostile.theme, &[&hostile]).into_string();

        assert!(!html.contains("<b>& Noise</b>"));
        assert!(!html.contains("x < y && y > z"));
        assert!(!html.contains("x=1&y=<2>"));
        assert!(html.contains("Scores &lt;b&gt;&amp; Noise&lt;/b&gt; preview"));
        assert!(html.contains("<title>Diffusion &amp; Generative Modeling — mbottoni</title>"));
        assert!(html.contains(r#"<time datetime="2024-03-05">Mar 5, 2024</time>"#));
    }

    #[test]
    fn test_theme_page_without_image_leaves_media_empty() {
        let site = SiteConfig::default();
        let gcn = fixture("gcn", "GCN", "2024-01-01");
        let html = theme_page(&site, resolve_theme("gcn"), &[&gcn]).into_string();
        assert!(html.contains(r#"<div class="post-card__media"></div>"#));
    }

    #[test]
    fn test_post_list_counts_posts() {
        let site = SiteConfig::default();
        let posts = vec![
            fixture("moe", "MoE", "2024-04-01"),
            fixture("rag", "RAG", "2024-02-01"),
            fixture("swarm", "Swarm", "2023-12-24"),
        ];
        let html = post_list(&site, &group_by_theme(&posts)).into_string();

        assert!(html.contains(
            r#"2 posts · Latest: <time datetime="2024-04-01">Apr 1, 2024</time>"#
        ));
        assert!(html.contains(
            r#"1 post · Latest: <time datetime="2023-12-24">Dec 24, 2023</time>"#
        ));
        assert!(!html.contains("/themes/generative.html"));
        assert!(html.find("/themes/frontier.html") < html.find("/themes/graph-rl.html"));
    }

    #[test]
    fn test_post_list_empty_group_has_no_latest() {
        let site = SiteConfig::default();
        let groups = [ThemeGroup {
            theme: default_theme(),
            posts: vec![],
        }];
        let html = post_list(&site, &groups).into_string();

        assert!(html.contains(r#"<p class="theme-meta">0 posts</p>"#));
        assert!(!html.contains("Latest"));
        assert!(html.contains("/themes/foundations.html"));
    }

    #[test]
    fn test_page_adds_configured_stylesheet() {
        let site = SiteConfig::default();
        let resume = page(&site, "resume", html! { h1 { "Resume" } }).into_string();
        assert!(resume.contains(r#"<link rel="stylesheet" href="/css/resume.css">"#));
        assert!(resume.contains("/edit/master/content/resume.dj"));

        let about = page(&site, "about", html! { h1 { "About" } }).into_string();
        assert!(!about.contains("resume.css"));
        assert!(about.contains(r#"<link rel="canonical" href="https://mbottoni.github.io/about">"#));
    }

    #[test]
    fn test_base_omits_mailto_without_email() {
        let mut site = SiteConfig::default();
        site.author.email = None;
        let html = page(&site, "links", html! {}).into_string();
        assert!(!html.contains("mailto:"));
    }
}
