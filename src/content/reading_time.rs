//! Reading time estimate

const WORDS_PER_MINUTE: usize = 200;

/// CJK ideographs, kana and Hangul syllables are read one character at a time
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2EBE0}')
}

/// Count words: CJK characters one each, everything else split on whitespace and punctuation
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_whitespace() || c.is_ascii_punctuation() {
            in_word = false;
        } else if !in_word {
            in_word = true;
            count += 1;
        }
    }

    count
}

/// Human readable estimate such as "3 min read"
pub fn reading_time(text: &str) -> String {
    let words = count_words(text);
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    format!("{} min read", minutes)
}
