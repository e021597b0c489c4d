//! Theme catalog: the closed set of named style tables.
//!
//! Palettes follow the classic editor themes of the same names. Colors that
//! carry alpha in their original form are flattened against the theme
//! background at table construction.

use super::color::{Modifiers, Rgb};
use crate::error::Error;
use crate::token::TokenKind;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A named theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    /// Dracula.
    Dracula,
    /// GitHub (light).
    #[serde(rename = "GitHub")]
    GitHub,
    /// Night Owl.
    #[default]
    #[serde(rename = "Night Owl")]
    NightOwl,
    /// Duotone Light.
    #[serde(rename = "Duotone Light")]
    DuotoneLight,
    /// Visual Studio dark.
    #[serde(rename = "VS Dark")]
    VsDark,
}

impl Theme {
    /// Every theme, in selector order.
    pub const ALL: [Self; 5] = [
        Self::Dracula,
        Self::GitHub,
        Self::NightOwl,
        Self::DuotoneLight,
        Self::VsDark,
    ];

    /// Display name as shown in the theme selector.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dracula => "Dracula",
            Self::GitHub => "GitHub",
            Self::NightOwl => "Night Owl",
            Self::DuotoneLight => "Duotone Light",
            Self::VsDark => "VS Dark",
        }
    }

    /// The theme after this one in selector order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Resolve this theme to its style table.
    pub fn style_table(self) -> &'static StyleTable {
        match self {
            Self::Dracula => &DRACULA,
            Self::GitHub => &GITHUB,
            Self::NightOwl => &NIGHT_OWL,
            Self::DuotoneLight => &DUOTONE_LIGHT,
            Self::VsDark => &VS_DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = Error;

    /// Parse a theme name. Matching ignores case, spaces, dashes and underscores,
    /// so `night-owl`, `NightOwl` and `Night Owl` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|t| normalize(t.name()) == wanted)
            .ok_or_else(|| Error::UnknownTheme(s.to_string()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Visual attributes for one token.
///
/// `fg == None` means the token inherits the table's default foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenStyle {
    /// Foreground color, if the theme defines one.
    pub fg: Option<Rgb>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl TokenStyle {
    /// A style with only a foreground color.
    pub const fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            modifiers: Modifiers::empty(),
        }
    }

    /// Add modifiers (builder pattern).
    #[must_use]
    pub const fn with(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }
}

/// The concrete style values of one theme.
#[derive(Debug, Clone)]
pub struct StyleTable {
    /// Pane background.
    pub background: Rgb,
    /// Default text color for unstyled tokens.
    pub foreground: Rgb,
    styles: HashMap<TokenKind, TokenStyle>,
}

impl StyleTable {
    fn new(background: Rgb, foreground: Rgb, rules: &[(&[TokenKind], TokenStyle)]) -> Self {
        let mut styles = HashMap::new();
        for (kinds, style) in rules {
            for kind in *kinds {
                styles.insert(*kind, *style);
            }
        }
        Self {
            background,
            foreground,
            styles,
        }
    }

    /// Look up the style of a single token kind.
    pub fn get(&self, kind: TokenKind) -> Option<TokenStyle> {
        self.styles.get(&kind).copied()
    }

    /// Resolve the style of a token carrying `kinds`.
    ///
    /// Kinds are applied in order: a later kind's color overrides an earlier
    /// one, modifiers accumulate. Kinds without an entry are skipped; a token
    /// with no resolvable kind gets the default (inherited) style.
    pub fn resolve(&self, kinds: &[TokenKind]) -> TokenStyle {
        kinds
            .iter()
            .filter_map(|kind| self.get(*kind))
            .fold(TokenStyle::default(), |acc, style| TokenStyle {
                fg: style.fg.or(acc.fg),
                modifiers: acc.modifiers | style.modifiers,
            })
    }

    /// Concrete foreground for a resolved style.
    pub fn foreground_of(&self, style: TokenStyle) -> Rgb {
        style.fg.unwrap_or(self.foreground)
    }
}

use TokenKind as K;

const ITALIC: Modifiers = Modifiers::ITALIC;

static DRACULA: Lazy<StyleTable> = Lazy::new(|| {
    let purple = Rgb::new(189, 147, 249);
    StyleTable::new(
        Rgb::hex(0x282A36),
        Rgb::hex(0xF8F8F2),
        &[
            (&[K::Constant, K::Builtin, K::Number, K::Boolean], TokenStyle::fg(purple)),
            (&[K::Inserted, K::Function], TokenStyle::fg(Rgb::new(80, 250, 123))),
            (&[K::Deleted], TokenStyle::fg(Rgb::new(255, 85, 85))),
            (&[K::Changed], TokenStyle::fg(Rgb::new(255, 184, 108))),
            (&[K::Punctuation, K::Operator], TokenStyle::fg(Rgb::new(248, 248, 242))),
            (&[K::String, K::Char, K::Tag, K::Regex], TokenStyle::fg(Rgb::new(255, 121, 198))),
            (&[K::Keyword, K::Variable], TokenStyle::fg(purple).with(ITALIC)),
            (&[K::Comment], TokenStyle::fg(Rgb::new(98, 114, 164))),
            (&[K::AttrName, K::ClassName], TokenStyle::fg(Rgb::new(241, 250, 140))),
        ],
    )
});

static GITHUB: Lazy<StyleTable> = Lazy::new(|| {
    let background = Rgb::hex(0xF6F8FA);
    StyleTable::new(
        background,
        Rgb::hex(0x393A34),
        &[
            (&[K::Comment], TokenStyle::fg(Rgb::hex(0x999988)).with(ITALIC)),
            (&[K::Namespace], TokenStyle::fg(Rgb::hex(0x393A34).over(background, 0.7))),
            (&[K::String, K::AttrValue], TokenStyle::fg(Rgb::hex(0xE3116C))),
            (&[K::Punctuation, K::Operator], TokenStyle::fg(Rgb::hex(0x393A34))),
            (
                &[K::Number, K::Boolean, K::Variable, K::Constant, K::Property, K::Regex, K::Inserted],
                TokenStyle::fg(Rgb::hex(0x36ACAA)),
            ),
            (&[K::Keyword, K::AttrName], TokenStyle::fg(Rgb::hex(0x00A4DB))),
            (&[K::Function, K::Deleted], TokenStyle::fg(Rgb::hex(0xD73A49))),
            (&[K::ClassName], TokenStyle::fg(Rgb::hex(0x6F42C1))),
            (&[K::Tag, K::Builtin], TokenStyle::fg(Rgb::hex(0x00009F))),
        ],
    )
});

static NIGHT_OWL: Lazy<StyleTable> = Lazy::new(|| {
    let background = Rgb::hex(0x011627);
    StyleTable::new(
        background,
        Rgb::hex(0xD6DEEB),
        &[
            (&[K::Changed], TokenStyle::fg(Rgb::new(162, 191, 252)).with(ITALIC)),
            (&[K::Deleted], TokenStyle::fg(Rgb::new(239, 83, 80).over(background, 0.56)).with(ITALIC)),
            (&[K::Inserted, K::AttrName], TokenStyle::fg(Rgb::new(173, 219, 103)).with(ITALIC)),
            (&[K::Comment], TokenStyle::fg(Rgb::new(99, 119, 119)).with(ITALIC)),
            (&[K::String], TokenStyle::fg(Rgb::new(173, 219, 103))),
            (&[K::Variable], TokenStyle::fg(Rgb::new(214, 222, 235))),
            (&[K::Number], TokenStyle::fg(Rgb::new(247, 140, 108))),
            (&[K::Builtin, K::Char, K::Constant, K::Function], TokenStyle::fg(Rgb::new(130, 170, 255))),
            (&[K::Punctuation], TokenStyle::fg(Rgb::new(199, 146, 234))),
            (&[K::ClassName], TokenStyle::fg(Rgb::new(255, 203, 139))),
            (&[K::Tag, K::Operator, K::Keyword], TokenStyle::fg(Rgb::new(127, 219, 202))),
            (&[K::Boolean], TokenStyle::fg(Rgb::new(255, 88, 116))),
            (&[K::Property], TokenStyle::fg(Rgb::new(128, 203, 196))),
            (&[K::Namespace], TokenStyle::fg(Rgb::new(178, 204, 214))),
        ],
    )
});

static DUOTONE_LIGHT: Lazy<StyleTable> = Lazy::new(|| {
    let background = Rgb::hex(0xFAF8F5);
    StyleTable::new(
        background,
        Rgb::hex(0x728FCB),
        &[
            (&[K::Comment, K::Punctuation], TokenStyle::fg(Rgb::hex(0xB6AD9A))),
            (&[K::Namespace], TokenStyle::fg(Rgb::hex(0x728FCB).over(background, 0.7))),
            (&[K::Tag, K::Operator, K::Number], TokenStyle::fg(Rgb::hex(0x063289))),
            (&[K::Property, K::Function], TokenStyle::fg(Rgb::hex(0xB29762))),
            (&[K::ClassName], TokenStyle::fg(Rgb::hex(0x2D2006))),
            (&[K::AttrName], TokenStyle::fg(Rgb::hex(0x896724))),
            (
                &[K::Boolean, K::String, K::AttrValue, K::Keyword, K::Regex],
                TokenStyle::fg(Rgb::hex(0x728FCB)),
            ),
            (&[K::Variable, K::Constant], TokenStyle::fg(Rgb::hex(0x93ABDC))),
            (&[K::Deleted], TokenStyle::default().with(Modifiers::STRIKETHROUGH)),
            (&[K::Inserted], TokenStyle::default().with(Modifiers::UNDERLINE)),
        ],
    )
});

static VS_DARK: Lazy<StyleTable> = Lazy::new(|| {
    StyleTable::new(
        Rgb::hex(0x1E1E1E),
        Rgb::hex(0x9CDCFE),
        &[
            (&[K::Comment], TokenStyle::fg(Rgb::new(106, 153, 85))),
            (&[K::Builtin, K::Changed, K::Keyword], TokenStyle::fg(Rgb::new(86, 156, 214))),
            (&[K::Number, K::Inserted], TokenStyle::fg(Rgb::new(181, 206, 168))),
            (&[K::Constant], TokenStyle::fg(Rgb::new(100, 102, 149))),
            (&[K::AttrName, K::Variable], TokenStyle::fg(Rgb::new(156, 220, 254))),
            (&[K::Deleted, K::String, K::AttrValue], TokenStyle::fg(Rgb::new(206, 145, 120))),
            (&[K::Tag, K::ClassName], TokenStyle::fg(Rgb::new(78, 201, 176))),
            (&[K::Operator, K::Punctuation], TokenStyle::fg(Rgb::new(212, 212, 212))),
            (&[K::Function], TokenStyle::fg(Rgb::new(220, 220, 170))),
            (&[K::Char], TokenStyle::fg(Rgb::new(209, 105, 105))),
            (&[K::Regex], TokenStyle::fg(Rgb::new(215, 186, 125))),
        ],
    )
});
