//! Pairwise TF-IDF cosine similarity.
//!
//! The vocabulary and IDF weights are fit on exactly the two input spans and
//! thrown away afterwards; nothing is shared between comparisons.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

/// Tokens are runs of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Returns the TF-IDF cosine similarity of `a` and `b`, in `[0, 1]`.
///
/// When either span has no terms left after stop-word removal the score is `0.0`.
pub fn lexical_similarity(a: &str, b: &str) -> f64 {
    let terms_a = term_counts(a);
    let terms_b = term_counts(b);

    if terms_a.is_empty() || terms_b.is_empty() {
        return 0.0;
    }

    let weights_a = tfidf_weights(&terms_a, &terms_b);
    let weights_b = tfidf_weights(&terms_b, &terms_a);

    let dot: f64 = weights_a
        .iter()
        .filter_map(|(term, wa)| weights_b.get(term).map(|wb| wa * wb))
        .sum();

    dot.clamp(0.0, 1.0)
}

/// Lower-cased term frequencies with stop words removed.
pub(crate) fn term_counts(text: &str) -> HashMap<String, u32> {
    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();

    for token in TOKEN_PATTERN.find_iter(&lowered) {
        let token = token.as_str();
        if STOP_WORDS.contains(token) {
            continue;
        }
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }

    counts
}

/// L2-normalised `tf * idf` for `own`, with document frequency taken over the pair.
///
/// Smoothed IDF over two documents: `ln(3 / (1 + df)) + 1`.
fn tfidf_weights<'a>(
    own: &'a HashMap<String, u32>,
    other: &HashMap<String, u32>,
) -> HashMap<&'a str, f64> {
    const DOCS: f64 = 2.0;

    let mut weights: HashMap<&str, f64> = own
        .iter()
        .map(|(term, tf)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            let idf = ((1.0 + DOCS) / (1.0 + df)).ln() + 1.0;
            (term.as_str(), f64::from(*tf) * idf)
        })
        .collect();

    let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in weights.values_mut() {
            *w /= norm;
        }
    }

    weights
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];
