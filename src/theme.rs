//! Defines the [`ThemeConfig`] type, which represents the topical category a
//! [`crate::post::Post`] is filed under, along with the static registry of
//! themes and the slug lookup that assigns posts to them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// The closed set of theme identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeKey {
    Frontier,
    Generative,
    GraphRl,
    Foundations,
}

impl ThemeKey {
    /// The key as it appears in configuration and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKey::Frontier => "frontier",
            ThemeKey::Generative => "generative",
            ThemeKey::GraphRl => "graph_rl",
            ThemeKey::Foundations => "foundations",
        }
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ThemeKey {
    type Err = UnknownThemeKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        THEMES
            .iter()
            .map(|theme| theme.key)
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownThemeKey(s.to_owned()))
    }
}

/// Returned when parsing a [`ThemeKey`] from text that names no theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownThemeKey(pub String);

impl fmt::Display for UnknownThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown theme key `{}`", self.0)
    }
}

impl std::error::Error for UnknownThemeKey {}

/// A theme definition. All definitions live in [`THEMES`] for the lifetime of
/// the process and are handed out as `&'static` references.
#[derive(Debug, PartialEq, Eq)]
pub struct ThemeConfig {
    pub key: ThemeKey,

    /// The human-readable name shown on cards, banners and page titles.
    pub title: &'static str,

    pub description: &'static str,

    /// The site-relative URL of the theme's listing page, e.g.
    /// `/themes/frontier.html`.
    pub path: &'static str,
}

/// Every theme, in the order they are listed on the home page.
pub static THEMES: [ThemeConfig; 4] = [
    ThemeConfig {
        key: ThemeKey::Frontier,
        title: "Frontier LLMs & Architectures",
        description: "Transformers, mixture-of-experts, interpretability, retrieval, \
            self-supervision, and training techniques for large models.",
        path: "/themes/frontier.html",
    },
    ThemeConfig {
        key: ThemeKey::Generative,
        title: "Diffusion & Generative Modeling",
        description: "Diffusion processes, flows, GAN/CTGAN, CFG tricks, and other \
            approaches to high-dimensional generation.",
        path: "/themes/generative.html",
    },
    ThemeConfig {
        key: ThemeKey::GraphRl,
        title: "Graphs, Agents & RL",
        description: "Graph neural networks, swarm simulations, and \
            reinforcement-learning flavored explorations.",
        path: "/themes/graph-rl.html",
    },
    ThemeConfig {
        key: ThemeKey::Foundations,
        title: "Math, Physics & Foundations",
        description: "Hopfield networks, Kalman filters, Kolmogorov ideas, probability, \
            information theory, and philosophical musings.",
        path: "/themes/foundations.html",
    },
];

/// Slugs not listed here resolve to this theme.
const DEFAULT_THEME: ThemeKey = ThemeKey::Foundations;

/// Which post slugs are filed under which theme. Slugs are stored lower-case.
const ASSIGNMENTS: &[(ThemeKey, &[&str])] = &[
    (
        ThemeKey::Frontier,
        &[
            "bertimbau",
            "transformer",
            "decoding",
            "llm-archs",
            "rag",
            "llm-quant",
            "kan",
            "sae",
            "ssl",
            "deepseek",
            "grpo",
            "mech-inter",
            "neural-collapse",
            "moe",
        ],
    ),
    (
        ThemeKey::Generative,
        &[
            "ctgan",
            "diffusion",
            "ddim_ddpm",
            "flow",
            "timeseries-diffusion",
            "cfg",
            "vaes",
        ],
    ),
    (
        ThemeKey::GraphRl,
        &["simple_rl", "gcn", "temporal-gnn", "swarm"],
    ),
    (
        ThemeKey::Foundations,
        &[
            "hopfield",
            "hopfield_from_scratch",
            "up",
            "kalman",
            "mandelbrot",
            "kolmogorov",
            "divergences",
            "iit",
            "plato",
            "prob",
        ],
    ),
];

static SLUG_LOOKUP: LazyLock<HashMap<String, &'static ThemeConfig>> = LazyLock::new(|| {
    let mut lookup = HashMap::new();
    for (key, slugs) in ASSIGNMENTS {
        let theme = theme(*key);
        for slug in *slugs {
            lookup.insert(slug.to_lowercase(), theme);
        }
    }
    lookup
});

/// Returns all theme definitions in declaration order.
pub fn themes() -> &'static [ThemeConfig] {
    &THEMES
}

/// Returns the definition for `key`.
pub fn theme(key: ThemeKey) -> &'static ThemeConfig {
    match key {
        ThemeKey::Frontier => &THEMES[0],
        ThemeKey::Generative => &THEMES[1],
        ThemeKey::GraphRl => &THEMES[2],
        ThemeKey::Foundations => &THEMES[3],
    }
}

/// The theme unassigned slugs are filed under.
pub fn default_theme() -> &'static ThemeConfig {
    theme(DEFAULT_THEME)
}

/// Resolves a post slug to its theme. The lookup ignores case and never fails:
/// a slug with no assignment quietly lands in [`default_theme`].
pub fn resolve_theme(slug: &str) -> &'static ThemeConfig {
    match SLUG_LOOKUP.get(&slug.to_lowercase()) {
        Some(&theme) => theme,
        None => {
            log::debug!(
                "slug `{}` has no theme assignment; using `{}`",
                slug,
                DEFAULT_THEME
            );
            default_theme()
        }
    }
}
