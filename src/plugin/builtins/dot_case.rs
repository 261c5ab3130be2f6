use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::plugin::contract::{Bundle, Plugin};

/// Word-tokenizing title caser: split the file name on delimiter runs,
/// capitalize each word, keep English function words lowercase, and join the
/// words with the configured separator (dot by default). `&` inside a
/// delimiter run is spelled out as the word "and".
pub struct DotCase;

static DELIMITERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s.,:;\-_+=\[\](){}'"&~`!@#$%^*?<>]+"#).expect("valid delimiter class")
});

/// Delimiter symbols that become words of their own.
const SPECIAL_WORDS: &[(char, &str)] = &[('&', "and")];

/// Function words kept lowercase when they are not the first word.
const LOWERCASE_WORDS: &[&str] = &[
    "a", "about", "above", "across", "and", "after", "around", "are", "as", "at", "before",
    "behind", "below", "beside", "between", "by", "down", "during", "for", "from", "in", "into",
    "is", "like", "near", "not", "of", "off", "on", "onto", "or", "out", "since", "than", "the",
    "through", "till", "to", "toward", "towards", "until", "up", "with", "without",
];

impl Plugin for DotCase {
    fn apply(&self, bundle: Bundle<'_>) -> Result<()> {
        let separator = bundle.options.get_string("separator")?.to_string();
        let path = bundle.path;

        for target_item in bundle.target_items.iter_mut() {
            let target_path = target_item.target_path.clone();
            let base_name = path.basename(&target_path);
            let ext = path.extname(&target_path);
            // Only paths with a parent component and a real extension are
            // rewritten; a bare name has no parent to re-join, and a dot in
            // first position marks a hidden file, not an extension.
            if !target_path.contains(path.sep())
                || ext.is_empty()
                || ext.len() == base_name.len()
            {
                continue;
            }
            let name = &base_name[..base_name.len() - ext.len()];

            let new_name = recase(&tokenize(name)).join(&separator);
            let parent_path = path.dirname(&target_path);
            target_item.target_path = path.join(&[parent_path, &format!("{new_name}{ext}")]);
        }

        Ok(())
    }
}

/// Split a name into tokens: maximal non-delimiter runs, plus one inserted
/// replacement word per delimiter run that contains a special symbol (so
/// consecutive `&&` never duplicates "and").
fn tokenize(name: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut position = 0;

    for run in DELIMITERS.find_iter(name) {
        if run.start() > position {
            tokens.push(&name[position..run.start()]);
        }
        position = run.end();
        for (symbol, replacement) in SPECIAL_WORDS {
            if run.as_str().contains(*symbol) {
                tokens.push(replacement);
                break;
            }
        }
    }
    if position < name.len() {
        tokens.push(&name[position..]);
    }

    tokens.retain(|token| !token.is_empty());
    tokens
}

/// Casing pass. Tokens without a leading alphabetic run (e.g. "123") pass
/// through untouched and do not count as words; the first word gets its
/// initial capitalized; later words are forced lowercase when their leading
/// alphabetic run is a known function word, capitalized when they start
/// lowercase, and preserved when they already start uppercase (so ALL-CAPS
/// tokens survive).
fn recase(tokens: &[&str]) -> Vec<String> {
    let mut cased = Vec::with_capacity(tokens.len());
    let mut word_index = 0usize;

    for token in tokens {
        let run_len = token
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .count();
        if run_len == 0 {
            cased.push((*token).to_string());
            continue;
        }

        let (run, rest) = token.split_at(run_len);
        let rendered = if word_index == 0 {
            capitalize_first(token)
        } else {
            let lowered = run.to_lowercase();
            if LOWERCASE_WORDS.contains(&lowered.as_str()) {
                format!("{lowered}{rest}")
            } else {
                capitalize_first(token)
            }
        };

        cased.push(rendered);
        word_index += 1;
    }

    cased
}

fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
