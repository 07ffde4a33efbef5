//! Mode finding built on [`ChainingMap`] as a frequency counter

use crate::ChainingMap;

/// The most frequent values of a sequence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mode {
    /// Every value that occurs `frequency` times, in unspecified order
    pub values: Vec<String>,
    /// The highest number of occurrences of any value; 0 for an empty sequence
    pub frequency: usize,
}

/// Finds the mode values of `values` and how often they occur.
///
/// Counts occurrences in a [`ChainingMap`] in one pass, tracking the highest count,
/// then collects every value whose count equals it.
///
/// ```rust
/// use primehash::find_mode;
///
/// let mode = find_mode(["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(mode.values, vec!["apple".to_string()]);
/// assert_eq!(mode.frequency, 2);
/// ```
pub fn find_mode<I>(values: I) -> Mode
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut counts: ChainingMap<usize> = ChainingMap::default();
    let mut frequency = 0;

    for value in values {
        let value = value.as_ref();
        let count = match counts.get_mut(value) {
            Some(count) => {
                *count = count.saturating_add(1);
                *count
            }
            None => {
                counts.put(value.to_string(), 1);
                1
            }
        };
        frequency = frequency.max(count);
    }

    let values = counts
        .iter()
        .filter(|node| *node.value() == frequency)
        .map(|node| node.key().to_string())
        .collect();

    Mode { values, frequency }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut values: Vec<String>) -> Vec<String> {
        values.sort_unstable();
        values
    }

    #[test]
    fn test_single_mode() {
        let mode = find_mode(["apple", "apple", "grape", "melon", "peach"]);
        assert_eq!(mode.values, vec!["apple".to_string()]);
        assert_eq!(mode.frequency, 2);
    }

    #[test]
    fn test_tied_modes() {
        let mode = find_mode(["one", "two", "three", "four", "two", "four", "one"]);
        assert_eq!(sorted(mode.values), vec!["four", "one", "two"]);
        assert_eq!(mode.frequency, 2);
    }

    #[test]
    fn test_all_distinct() {
        let mode = find_mode(vec!["Arch".to_string(), "Manjaro".to_string(), "Fedora".to_string()]);
        assert_eq!(sorted(mode.values), vec!["Arch", "Fedora", "Manjaro"]);
        assert_eq!(mode.frequency, 1);
    }

    #[test]
    fn test_many_values_force_resizes() {
        let values: Vec<String> = (0..500).map(|i| format!("v{}", i % 100)).collect();
        let mode = find_mode(&values);
        assert_eq!(mode.values.len(), 100);
        assert_eq!(mode.frequency, 5);
    }

    #[test]
    fn test_empty_input() {
        let mode = find_mode(Vec::<&str>::new());
        assert_eq!(mode, Mode::default());
    }
}
