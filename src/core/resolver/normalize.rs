//! Decoration stripping for name matching
//!
//! Task and project names are often prefixed with emoji ("🚀 Launch") or carry
//! invisible presentation code points. Stripping removes those so the plain
//! text can be compared.

use unicode_normalization::UnicodeNormalization;

/// Remove emoji, variation selectors, joiners and similar decorations
///
/// The text is NFC-composed first, then decoration code points are dropped and
/// whitespace is collapsed. Letters, digits and punctuation are kept as is and
/// case is preserved.
///
/// ```
/// use taskgate::core::resolver::strip_decorations;
///
/// assert_eq!(strip_decorations("🚀 Launch"), "Launch");
/// assert_eq!(strip_decorations("Q3 👩\u{200D}💻  Roadmap"), "Q3 Roadmap");
/// ```
pub fn strip_decorations(text: &str) -> String {
    let composed: String = text.nfc().filter(|c| !is_decoration(*c)).collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `c` is presentation-only for matching purposes
pub fn is_decoration(c: char) -> bool {
    matches!(
        c as u32,
        // Zero width space, non-joiner, joiner
        0x200B..=0x200D
            // Combining enclosing keycap
            | 0x20E3
            // Miscellaneous technical (watch, hourglass, ...)
            | 0x231A..=0x23FF
            // Miscellaneous symbols and dingbats
            | 0x2600..=0x27BF
            // Stars and circles used as emoji
            | 0x2B50..=0x2B55
            // Variation selectors
            | 0xFE00..=0xFE0F
            // Mahjong, cards, enclosed alphanumerics, regional indicators
            | 0x1F000..=0x1F2FF
            // Pictographs, emoticons, transport, skin tone modifiers
            | 0x1F300..=0x1F6FF
            // Geometric shapes extended through symbols and pictographs extended-A
            | 0x1F780..=0x1FAFF
            // Tags
            | 0xE0020..=0xE007F
    )
}
