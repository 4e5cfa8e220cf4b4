//! Polarity classification by distinct-keyword presence voting.

use sajulint_kernel::catalog::Lexicon;
use sajulint_kernel::lang::Polarity;

/// Count how many distinct keywords from each list occur anywhere in the
/// text (presence per keyword, not occurrence frequency) and let the
/// larger side win. Ties, including no match on either side, are neutral.
pub fn classify_polarity(text: &str, lexicon: &Lexicon) -> Polarity {
    let present =
        |words: &[&str]| words.iter().copied().filter(|w| text.contains(w)).count();
    let negative = present(lexicon.negative);
    let positive = present(lexicon.positive);
    if negative > positive {
        Polarity::Negative
    } else if positive > negative {
        Polarity::Positive
    } else {
        Polarity::Neutral
    }
}
