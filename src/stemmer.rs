// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The original Porter stemmer (M.F. Porter, 1980).
//!
//! This is the variant documentation search clients run in the browser, including
//! its two departures from the paper (`bli -> ble`, `logi -> log`). It has to be:
//! a query stem that differs from the stored stem by one letter finds nothing.
//!
//! Input is expected lowercase ASCII; other words come back unchanged.
//! Anything that is not `a e i o u` (or a `y`
//! acting as a vowel) counts as a consonant, digits and underscores included,
//! which is how `associated_user_first_name` ends up as
//! `associated_user_first_nam`.
//!
//! # Measure
//!
//! Every word has the form `[C](VC){m}[V]`; `m` is its *measure*. Most rules only
//! fire when the remaining stem is long enough in that sense.

/// Step 2 suffix rewrites (applied when the stem has `m > 0`).
const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

/// Step 3 suffix rewrites (applied when the stem has `m > 0`).
const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Step 4 suffixes (removed when the stem has `m > 1`).
const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Stem one lowercase word.
pub fn stem(word: &str) -> String {
    if word.len() < 3 || !word.is_ascii() {
        return word.to_string();
    }
    let mut w: Vec<char> = word.chars().collect();

    // A leading y is always a consonant; mark it so the vowel rules skip it.
    let leading_y = w[0] == 'y';
    if leading_y {
        w[0] = 'Y';
    }

    step1a(&mut w);
    step1b(&mut w);
    step1c(&mut w);
    rewrite_longest(&mut w, STEP2, 0);
    rewrite_longest(&mut w, STEP3, 0);
    step4(&mut w);
    step5(&mut w);

    if leading_y {
        w[0] = 'y';
    }
    w.into_iter().collect()
}

fn is_consonant(w: &[char], i: usize) -> bool {
    match w[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

fn measure(s: &[char]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..s.len() {
        let consonant = is_consonant(s, i);
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn has_vowel(s: &[char]) -> bool {
    (0..s.len()).any(|i| !is_consonant(s, i))
}

/// Whether `w` ends with `suffix` and leaves a non-empty stem.
fn has_suffix(w: &[char], suffix: &str) -> bool {
    let n = suffix.chars().count();
    w.len() > n && w[w.len() - n..].iter().copied().eq(suffix.chars())
}

fn truncate_suffix(w: &mut Vec<char>, suffix: &str) {
    let n = suffix.chars().count();
    w.truncate(w.len() - n);
}

/// `^C v [^aeiouwxy]$`: a single consonant cluster, one vowel, one closing
/// consonant. Words like `hop` and `fil` get their `e` back.
fn is_short_cvc(s: &[char]) -> bool {
    let n = s.len();
    if n < 3 {
        return false;
    }
    let last_ok = !matches!(s[n - 1], 'a' | 'e' | 'i' | 'o' | 'u' | 'w' | 'x' | 'y');
    let vowel_ok = matches!(s[n - 2], 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let head_ok = !matches!(s[0], 'a' | 'e' | 'i' | 'o' | 'u')
        && s[1..n - 2]
            .iter()
            .all(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y'));
    last_ok && vowel_ok && head_ok
}

/// Plurals: `sses -> ss`, `ies -> i`, trailing `s` dropped unless `ss`.
fn step1a(w: &mut Vec<char>) {
    if has_suffix(w, "sses") || has_suffix(w, "ies") {
        w.truncate(w.len() - 2);
    } else if w.len() >= 3 && w[w.len() - 1] == 's' && w[w.len() - 2] != 's' {
        w.pop();
    }
}

/// Past tense and gerunds: `eed`, `ed`, `ing`.
fn step1b(w: &mut Vec<char>) {
    if has_suffix(w, "eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.pop();
        }
        return;
    }

    let suffix = if has_suffix(w, "ed") {
        "ed"
    } else if has_suffix(w, "ing") {
        "ing"
    } else {
        return;
    };
    let stem_len = w.len() - suffix.chars().count();
    if !has_vowel(&w[..stem_len]) {
        return;
    }
    truncate_suffix(w, suffix);

    let n = w.len();
    let ends = |tail: &str| n >= 2 && w[n - 2..].iter().copied().eq(tail.chars());
    if ends("at") || ends("bl") || ends("iz") {
        w.push('e');
    } else if n >= 2
        && w[n - 1] == w[n - 2]
        && !matches!(w[n - 1], 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'l' | 's' | 'z')
    {
        w.pop();
    } else if is_short_cvc(w) {
        w.push('e');
    }
}

/// Terminal `y` becomes `i` when the stem has a vowel.
fn step1c(w: &mut [char]) {
    let n = w.len();
    if has_suffix(w, "y") && has_vowel(&w[..n - 1]) {
        w[n - 1] = 'i';
    }
}

/// Replace the longest matching suffix from `rules` when the stem's measure
/// exceeds `min_measure`. Only the longest suffix is considered.
fn rewrite_longest(w: &mut Vec<char>, rules: &[(&str, &str)], min_measure: usize) {
    let Some(&(suffix, replacement)) = rules
        .iter()
        .filter(|(suffix, _)| has_suffix(w, suffix))
        .max_by_key(|(suffix, _)| suffix.len())
    else {
        return;
    };
    let stem_len = w.len() - suffix.chars().count();
    if measure(&w[..stem_len]) > min_measure {
        w.truncate(stem_len);
        w.extend(replacement.chars());
    }
}

fn step4(w: &mut Vec<char>) {
    if let Some(suffix) = STEP4
        .iter()
        .filter(|suffix| has_suffix(w, suffix))
        .max_by_key(|suffix| suffix.len())
    {
        let stem_len = w.len() - suffix.chars().count();
        if measure(&w[..stem_len]) > 1 {
            w.truncate(stem_len);
        }
        return;
    }

    // (s|t)ion: the s or t stays with the stem.
    if has_suffix(w, "sion") || has_suffix(w, "tion") {
        let stem_len = w.len() - 3;
        if stem_len >= 2 && measure(&w[..stem_len]) > 1 {
            w.truncate(stem_len);
        }
    }
}

/// Final `e` and double `l`.
fn step5(w: &mut Vec<char>) {
    if has_suffix(w, "e") {
        let stem = &w[..w.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !is_short_cvc(stem)) {
            w.pop();
        }
    }

    let n = w.len();
    if n >= 2 && w[n - 1] == 'l' && w[n - 2] == 'l' && measure(w) > 1 {
        w.pop();
    }
}
