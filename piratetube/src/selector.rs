//! Maps the user's menu answer to an option.

use crate::error::Failure;
use crate::lister::QualityOption;

/// The option picked and whether it was the empty-input default.
#[derive(Debug)]
pub struct Selection<'a> {
    pub option: &'a QualityOption,
    pub auto: bool,
}

/// Resolve `input` against `options`.
///
/// Empty input picks the first (best) option; a plain decimal number in
/// `1..=N` picks that option. Everything else is rejected, with no fuzzy
/// matching.
pub fn select<'a>(options: &'a [QualityOption], input: &str) -> Result<Selection<'a>, Failure> {
    let input = input.trim();
    let invalid = || Failure::InvalidSelection(input.to_string());

    if input.is_empty() {
        return options
            .first()
            .map(|option| Selection { option, auto: true })
            .ok_or_else(invalid);
    }

    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map(|option| Selection {
            option,
            auto: false,
        })
        .ok_or_else(invalid)
}
