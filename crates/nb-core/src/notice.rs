//! Notice page addressing
//!
//! A blocked navigation is redirected to `<notice page>?type=<reason>&target=<url>`.
//! The notice page reads the same parameters back to choose its message and
//! show the address that was blocked.

use crate::types::Verdict;

pub const SITE_MESSAGE: &str = "This site is on your blocked list. Stay on track.";
pub const SEARCH_MESSAGE: &str = "This search matches a blocked request. Try something more focused.";

/// Escapes `urlencoding` emits for characters `encodeURIComponent` leaves alone.
const COMPONENT_SAFE: &[(&str, &str)] = &[
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Build the redirect address for a verdict. Returns `None` for `Allow`.
pub fn notice_url(notice_page: &str, verdict: Verdict, target_url: &str) -> Option<String> {
    if !verdict.is_blocked() {
        return None;
    }
    Some(format!(
        "{}?type={}&target={}",
        notice_page,
        NoticeKind::from(verdict).param(),
        encode_component(target_url)
    ))
}

/// Percent-encode a query value the way the extension's `encodeURIComponent` does.
fn encode_component(value: &str) -> String {
    // Every `%` in the output starts an escape, so the replacements cannot
    // split one.
    COMPONENT_SAFE
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |encoded, (escape, literal)| {
            encoded.replace(escape, literal)
        })
}

/// Which rule list caused the block, as carried on the notice page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Site,
    Search,
}

impl NoticeKind {
    /// Anything other than `search` reads as a site block.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("search") => Self::Search,
            _ => Self::Site,
        }
    }

    /// Value of the `type` parameter.
    pub fn param(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Search => "search",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Site => SITE_MESSAGE,
            Self::Search => SEARCH_MESSAGE,
        }
    }
}

impl From<Verdict> for NoticeKind {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::BlockSearch => Self::Search,
            _ => Self::Site,
        }
    }
}

/// Parameters of a notice page address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notice {
    pub kind: NoticeKind,
    /// The blocked address, if present
    pub target: Option<String>,
}

impl Notice {
    /// Read the parameters of a notice page address.
    ///
    /// The target is decoded a second time after query decoding; when that
    /// second pass fails the once-decoded value is kept.
    pub fn parse(notice_url: &str) -> Self {
        let without_fragment = notice_url.split('#').next().unwrap_or_default();
        let query = without_fragment
            .split_once('?')
            .map(|(_, query)| query)
            .unwrap_or_default();

        let mut kind = None;
        let mut target = None;
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                "type" if kind.is_none() => kind = Some(value.into_owned()),
                "target" if target.is_none() => target = Some(value.into_owned()),
                _ => {}
            }
        }

        let target = target.filter(|t| !t.is_empty()).map(|raw| match urlencoding::decode(&raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw,
        });

        Self {
            kind: NoticeKind::from_param(kind.as_deref()),
            target,
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}
