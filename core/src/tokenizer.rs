use crate::TermFreqs;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Turns raw text into normalized tokens.
///
/// Implementations must be deterministic: the same text has to produce the same
/// tokens when the corpus is indexed and when a query is checked against it.
pub trait Tokenizer {
    /// Identifier persisted alongside an index so a mismatched query tokenizer can be reported.
    fn name(&self) -> &str;

    fn tokenize(&self, text: &str) -> Vec<String>;

    fn term_frequencies(&self, text: &str) -> TermFreqs {
        term_frequencies(self.tokenize(text))
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn name(&self) -> &str { (**self).name() }
    fn tokenize(&self, text: &str) -> Vec<String> { (**self).tokenize(text) }
}

/// NFKC normalization, lowercasing, Unicode word segmentation and English stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct StemmingTokenizer {
    remove_stopwords: bool,
}

impl StemmingTokenizer {
    pub fn new() -> Self { Self::default() }

    /// Drop common English stop words before stemming.
    pub fn with_stopwords_removed(mut self, remove: bool) -> Self {
        self.remove_stopwords = remove;
        self
    }

    /// Rebuild the tokenizer recorded in a persisted index.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stemming" => Some(Self::new()),
            "stemming+stopwords" => Some(Self::new().with_stopwords_removed(true)),
            _ => None,
        }
    }
}

impl Tokenizer for StemmingTokenizer {
    fn name(&self) -> &str {
        if self.remove_stopwords { "stemming+stopwords" } else { "stemming" }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let token = mat.as_str();
            if self.remove_stopwords && is_stopword(token) { continue; }
            tokens.push(STEMMER.stem(token).into_owned());
        }
        tokens
    }
}

/// Splits on whitespace and lowercases, nothing else. Handy when exact tokens matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str { "whitespace" }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_lowercase).collect()
    }
}

/// Count occurrences of each token.
pub fn term_frequencies<I, S>(tokens: I) -> TermFreqs
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tf = TermFreqs::new();
    for token in tokens {
        *tf.entry(token.into()).or_insert(0) += 1;
    }
    tf
}
