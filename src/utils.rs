/// Splits `text` on `delimiter`, trims every piece and drops blank ones.
///
/// ```
/// use feature_logic::utils::split_trimmed;
///
/// assert_eq!(split_trimmed(" A, B ,,C ", ","), vec!["A", "B", "C"]);
/// ```
pub fn split_trimmed<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
