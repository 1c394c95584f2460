//! Text -> reference-encoded output.
//!
//! For each character, in order:
//! 1. a name in the selected [`ReferenceSet`] -> `&name;`
//! 2. else representable by the target -> the character itself
//! 3. else -> `&#<decimal scalar value>;`

use std::fmt::Write;
use std::str::FromStr;

use crate::error::UnknownCharset;
use crate::table::{EntityTable, ReferenceSet};

/// "Can the output target represent this character literally?"
pub trait CanEncode {
    fn can_encode(&self, ch: char) -> bool;
}

impl<F> CanEncode for F
where
    F: Fn(char) -> bool,
{
    fn can_encode(&self, ch: char) -> bool {
        self(ch)
    }
}

/// Output charsets understood by [`OutputSettings`].
///
/// Only answers the per-character representability question; no transcoding happens here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    #[default]
    Utf8,
    Utf16,
    Ascii,
    Latin1,
}

impl Charset {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
        }
    }
}

impl CanEncode for Charset {
    fn can_encode(&self, ch: char) -> bool {
        match self {
            Self::Utf8 | Self::Utf16 => true,
            Self::Ascii => ch.is_ascii(),
            Self::Latin1 => u32::from(ch) <= 0xFF,
        }
    }
}

impl FromStr for Charset {
    type Err = UnknownCharset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        match label.as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16" | "utf16" | "utf-16le" | "utf-16be" => Ok(Self::Utf16),
            "us-ascii" | "ascii" => Ok(Self::Ascii),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Self::Latin1),
            _ => Err(UnknownCharset(s.to_string())),
        }
    }
}

/// Serializer-facing escape configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputSettings {
    pub escape_mode: ReferenceSet,
    pub charset: Charset,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            escape_mode: ReferenceSet::Base,
            charset: Charset::Utf8,
        }
    }
}

impl OutputSettings {
    pub fn with_escape_mode(mut self, escape_mode: ReferenceSet) -> Self {
        self.escape_mode = escape_mode;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }
}

impl EntityTable {
    pub fn escape<E>(&self, text: &str, encoder: &E, mode: ReferenceSet) -> String
    where
        E: CanEncode + ?Sized,
    {
        let mut out = String::with_capacity(text.len() * 2);
        for ch in text.chars() {
            if let Some(name) = self.reverse_lookup(ch, mode) {
                out.push('&');
                out.push_str(name);
                out.push(';');
            } else if encoder.can_encode(ch) {
                out.push(ch);
            } else {
                let _ = write!(&mut out, "&#{};", u32::from(ch));
            }
        }
        out
    }

    pub fn escape_with_settings(&self, text: &str, settings: &OutputSettings) -> String {
        self.escape(text, &settings.charset, settings.escape_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static EntityTable {
        EntityTable::builtin()
    }

    fn any(_: char) -> bool {
        true
    }

    #[test]
    fn escape_empty_is_empty() {
        for mode in ReferenceSet::ALL {
            assert_eq!(table().escape("", &any, mode), "");
        }
    }

    #[test]
    fn restricted_escapes_markup_characters() {
        assert_eq!(table().escape("<", &any, ReferenceSet::Restricted), "&lt;");
        assert_eq!(
            table().escape("a < b && \"c\" > 'd'", &any, ReferenceSet::Restricted),
            "a &lt; b &amp;&amp; &quot;c&quot; &gt; &apos;d&apos;"
        );
    }

    #[test]
    fn restricted_leaves_other_names_literal() {
        assert_eq!(
            table().escape("caf\u{E9}\u{A0}", &any, ReferenceSet::Restricted),
            "caf\u{E9}\u{A0}"
        );
    }

    #[test]
    fn base_names_common_latin1() {
        assert_eq!(
            table().escape("\u{A9} caf\u{E9}\u{A0}", &any, ReferenceSet::Base),
            "&copy; caf&eacute;&nbsp;"
        );
    }

    #[test]
    fn full_names_punctuation_and_astral() {
        assert_eq!(
            table().escape("\u{2026}\u{1D504}", &any, ReferenceSet::Full),
            "&mldr;&Afr;"
        );
        assert_eq!(table().escape("a.b", &any, ReferenceSet::Full), "a&period;b");
    }

    #[test]
    fn unencodable_falls_back_to_decimal() {
        let ascii = |ch: char| ch.is_ascii();
        assert_eq!(
            table().escape("\u{2603} snow", &ascii, ReferenceSet::Base),
            "&#9731; snow"
        );
        // Astral characters emit one scalar value, not surrogate halves.
        assert_eq!(
            table().escape("\u{1F600}", &ascii, ReferenceSet::Full),
            "&#128512;"
        );
    }

    #[test]
    fn named_reference_wins_over_literal() {
        // `&` is always named even when the encoder could emit it.
        assert_eq!(table().escape("&", &any, ReferenceSet::Restricted), "&amp;");
    }

    #[test]
    fn output_never_shorter_than_input() {
        let text = "plain \u{E9}\u{2603}<>&\u{1F600}";
        for mode in ReferenceSet::ALL {
            for charset in [Charset::Utf8, Charset::Ascii, Charset::Latin1] {
                let out = table().escape(text, &charset, mode);
                assert!(out.len() >= text.len(), "{mode} {charset:?}: {out}");
            }
        }
    }

    #[test]
    fn output_settings_drive_escape() {
        let settings = OutputSettings::default()
            .with_escape_mode(ReferenceSet::Restricted)
            .with_charset(Charset::Ascii);
        assert_eq!(
            table().escape_with_settings("<\u{E9}>", &settings),
            "&lt;&#233;&gt;"
        );
        assert_eq!(
            table().escape_with_settings("<\u{E9}>", &OutputSettings::default()),
            "&lt;&eacute;&gt;"
        );
    }

    #[test]
    fn charset_capabilities() {
        assert!(Charset::Utf8.can_encode('\u{1F600}'));
        assert!(Charset::Utf16.can_encode('\u{1F600}'));
        assert!(Charset::Ascii.can_encode('~'));
        assert!(!Charset::Ascii.can_encode('\u{E9}'));
        assert!(Charset::Latin1.can_encode('\u{FF}'));
        assert!(!Charset::Latin1.can_encode('\u{100}'));
    }

    #[test]
    fn charset_labels_parse() {
        assert_eq!("UTF-8".parse(), Ok(Charset::Utf8));
        assert_eq!(" latin1 ".parse(), Ok(Charset::Latin1));
        assert_eq!("US-ASCII".parse(), Ok(Charset::Ascii));
        assert_eq!(
            "koi8-r".parse::<Charset>(),
            Err(UnknownCharset("koi8-r".to_string()))
        );
        for charset in [Charset::Utf8, Charset::Utf16, Charset::Ascii, Charset::Latin1] {
            assert_eq!(charset.label().parse(), Ok(charset));
        }
    }
}
