use std::fmt::Display;
use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Category of canned reply sent in place of lyrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCategory {
    /// The provider had no match
    NotFound,
    /// The lookup or the request itself failed
    Error,
    /// No song title was supplied
    NoTitle,
}

impl ResponseCategory {
    /// Ordered message pool for this category
    pub fn messages(self) -> &'static [&'static str] {
        match self {
            ResponseCategory::NotFound => NOT_FOUND_MESSAGES,
            ResponseCategory::Error => ERROR_MESSAGES,
            ResponseCategory::NoTitle => NO_TITLE_MESSAGES,
        }
    }

    /// Fixed text appended after the chosen message
    pub fn suffix(self) -> &'static str {
        match self {
            ResponseCategory::NotFound => NOT_FOUND_SUFFIX,
            ResponseCategory::Error => ERROR_SUFFIX,
            ResponseCategory::NoTitle => NO_TITLE_SUFFIX,
        }
    }
}

impl Display for ResponseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResponseCategory::NotFound => "not_found",
            ResponseCategory::Error => "error",
            ResponseCategory::NoTitle => "no_title",
        };
        write!(f, "{}", name)
    }
}

const NOT_FOUND_MESSAGES: &[&str] = &[
    "I couldn't find those lyrics in my database. Maybe it's a new song or a cover?",
    "I couldn't find those lyrics. Sometimes song titles can be tricky!",
    "I couldn't find those lyrics. Want to try a different spelling or artist name?",
    "I couldn't find those lyrics. It might be a remix or a cover version!",
];

const ERROR_MESSAGES: &[&str] = &[
    "I'm having a bit of trouble fetching those lyrics. Let's try again!",
    "I'm having some trouble with the lyrics. Could you try again?",
    "I'm having a bit of difficulty with those lyrics. Want to try again?",
    "I'm having some trouble with the lyrics. Could you try a different spelling?",
];

const NO_TITLE_MESSAGES: &[&str] = &[
    "I need a song title to help you find the lyrics!",
    "I'd love to help you find those lyrics, but I need a song title!",
    "I can't find the lyrics without knowing the song title!",
];

const NOT_FOUND_SUFFIX: &str = "\n\nHere are some tips:\n\
    - Check the spelling of the song title\n\
    - Try using the artist's full name\n\
    - Make sure you're using the original song title, not a cover version\n\
    \n\
    Would you like me to try searching again with a different spelling?";

const ERROR_SUFFIX: &str = "\n\nHere are some tips:\n\
    - Check your internet connection\n\
    - Try again in a few seconds\n\
    - Make sure you're using the correct song title\n\
    \n\
    Would you like me to try searching again?";

const NO_TITLE_SUFFIX: &str = "\n\nPlease let me know which song you're looking for!";

/// Source of randomness for choosing a canned message
pub trait MessagePicker: Send + Sync {
    /// Returns an index in `0..len`; `len` is never zero.
    ///
    /// The returned index is used as is, implementations keep it in range.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl MessagePicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform choice from a seeded RNG, reproducible across runs
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MessagePicker for SeededPicker {
    fn pick(&self, len: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..len),
            Err(poisoned) => poisoned.into_inner().gen_range(0..len),
        }
    }
}

/// Always picks the same position, clamped to the pool size
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl MessagePicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

/// Canned reply table with an injectable picker
#[derive(Clone)]
pub struct CannedResponses {
    picker: Arc<dyn MessagePicker>,
}

impl Default for CannedResponses {
    fn default() -> Self {
        Self::new(Arc::new(RandomPicker))
    }
}

impl CannedResponses {
    pub fn new(picker: Arc<dyn MessagePicker>) -> Self {
        Self { picker }
    }

    /// One message from the category's pool
    pub fn message(&self, category: ResponseCategory) -> &'static str {
        let pool = category.messages();
        pool[self.picker.pick(pool.len())]
    }

    /// Full reply text: a pooled message followed by the category's fixed suffix
    pub fn compose(&self, category: ResponseCategory) -> String {
        format!("{}{}", self.message(category), category.suffix())
    }
}
