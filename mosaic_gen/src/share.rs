// Social share deep links.
//
// The share surface is deliberately thin: a fixed promotional text plus
// the application URL, packed into the standard Twitter intent and
// Facebook sharer URLs. There is no per-mosaic page — platforms that
// need an image get it from the user's PNG download.
//
// Percent-encoding follows `encodeURIComponent` semantics (RFC 3986
// unreserved set plus `!~*'()`), so the links match what the web client
// produces byte-for-byte.

/// Promotional text attached to every share.
pub const SHARE_TEXT: &str = "I created this unique piece of generative art based on my \
    emotions with Mindful Mosaic. Check it out and create your own! #MindfulMosaic \
    #GenerativeArt #EmotionalWellness #MentalHealthArt";

/// Twitter share intent carrying the promo text and the app URL.
pub fn twitter_share_url(app_url: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        percent_encode(SHARE_TEXT),
        percent_encode(app_url)
    )
}

/// Facebook sharer link carrying the app URL and the promo text as the
/// quote.
pub fn facebook_share_url(app_url: &str) -> String {
    format!(
        "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
        percent_encode(app_url),
        percent_encode(SHARE_TEXT)
    )
}

/// `encodeURIComponent`-style percent encoding: leaves `A-Z a-z 0-9`
/// and `- _ . ! ~ * ' ( )` intact, encodes everything else as UTF-8
/// `%XX` with uppercase hex.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
