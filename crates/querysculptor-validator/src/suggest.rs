/// Finds the closest name to `target` among `candidates` by Levenshtein
/// distance, accepting it only within `min(3, ceil(len(target) * 0.6))` —
/// tight enough that "pokemn" suggests "pokemons" but a wildly different
/// name suggests nothing.
pub fn nearest_name<'a>(target: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let threshold = (((target.chars().count() as f64) * 0.6).ceil() as usize).min(3);
    candidates
        .into_iter()
        .map(|candidate| (candidate, strsim::levenshtein(target, candidate)))
        .filter(|(_, distance)| *distance <= threshold && *distance > 0)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Renders the "Did you mean 'X'?" suffix, or the empty string when there's
/// no close-enough candidate.
pub fn did_you_mean_suffix<'a>(target: &str, candidates: impl IntoIterator<Item = &'a str>) -> String {
    match nearest_name(target, candidates) {
        Some(name) => format!(" Did you mean '{name}'?"),
        None => String::new(),
    }
}
