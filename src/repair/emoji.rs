//! Marker emoji restoration
//!
//! Older captures went through tooling that either wrote the marker emoji as
//! literal `\uXXXX` escapes or decoded their UTF-8 bytes as Windows-1252.
//! Both forms are mapped back to the emoji. Text that is already clean is
//! returned unchanged, so the fix can be applied any number of times.

use once_cell::sync::Lazy;

/// Emoji the alert bot uses as section and action markers
pub const MARKER_EMOJI: [&str; 10] = ["🟢", "🔴", "💸", "🔁", "🆕", "🔹", "✊", "📈", "📉", "🔗"];

/// Windows-1252 code points for bytes 0x80..=0x9F; `None` where undefined
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

fn cp1252_char(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9F => CP1252_HIGH[(byte - 0x80) as usize],
        _ => Some(byte as char),
    }
}

/// How `emoji` reads after its UTF-8 bytes were decoded as Windows-1252
///
/// `None` when a byte has no Windows-1252 mapping (that emoji can never
/// appear in this damaged form).
pub fn cp1252_mojibake(emoji: &str) -> Option<String> {
    emoji.bytes().map(cp1252_char).collect()
}

/// JSON-style escape of every UTF-16 unit, e.g. `🟢`
fn escaped(emoji: &str, upper: bool) -> String {
    emoji
        .encode_utf16()
        .map(|unit| {
            if upper {
                format!("\\u{:04X}", unit)
            } else {
                format!("\\u{:04x}", unit)
            }
        })
        .collect()
}

/// (damaged form, emoji) pairs, longest damaged form first
static REPLACEMENTS: Lazy<Vec<(String, &'static str)>> = Lazy::new(|| {
    let mut table = Vec::new();

    for emoji in MARKER_EMOJI {
        table.push((escaped(emoji, false), emoji));
        let upper = escaped(emoji, true);
        if upper != table[table.len() - 1].0 {
            table.push((upper, emoji));
        }
        if let Some(mojibake) = cp1252_mojibake(emoji) {
            table.push((mojibake, emoji));
        }
    }

    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
});

/// Restore marker emoji in `text`
pub fn fix_emojis(text: &str) -> String {
    let mut fixed = text.to_string();
    for (damaged, emoji) in REPLACEMENTS.iter() {
        if fixed.contains(damaged.as_str()) {
            fixed = fixed.replace(damaged.as_str(), emoji);
        }
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mojibake_forms() {
        assert_eq!(cp1252_mojibake("🟢").as_deref(), Some("\u{f0}\u{178}\u{178}\u{a2}"));
        assert_eq!(cp1252_mojibake("✊").as_deref(), Some("\u{e2}\u{153}\u{160}"));
        assert_eq!(cp1252_mojibake("🔗").as_deref(), Some("\u{f0}\u{178}\u{201d}\u{2014}"));
        // 0x81 has no Windows-1252 mapping
        assert_eq!(cp1252_mojibake("🔁"), None);
    }

    #[test]
    fn test_fix_mojibake() {
        let damaged = "\u{f0}\u{178}\u{178}\u{a2} BUY FOO\n\u{f0}\u{178}\u{201d}\u{b9} Wallet\n\u{e2}\u{153}\u{160}Holds: 1";
        assert_eq!(fix_emojis(damaged), "🟢 BUY FOO\n🔹 Wallet\n✊Holds: 1");
    }

    #[test]
    fn test_fix_literal_escapes() {
        assert_eq!(fix_emojis("\\ud83d\\udd34 SELL BAR"), "🔴 SELL BAR");
        assert_eq!(fix_emojis("\\u270aHolds: 5"), "✊Holds: 5");
        assert_eq!(fix_emojis("\\uD83D\\uDD01 SWAP"), "🔁 SWAP");
        assert_eq!(fix_emojis("\\ud83d\\udcc8PnL: +5%"), "📈PnL: +5%");
    }

    #[test]
    fn test_clean_text_untouched() {
        let clean = "🟢 BUY FOO on Raydium\n🔗 #FOO | MC: $1K — café";
        assert_eq!(fix_emojis(clean), clean);
        assert_eq!(fix_emojis(&fix_emojis(clean)), clean);
    }
}
