use counted_btree::{CountedBTree, DEFAULT_DEGREE};
use std::time::{Duration, Instant};

// Word frequency report over a text file.
// Usage: word_frequency [PATH]   (defaults to BIBLE.txt)
// Tunables via env vars: DEGREE, TOP_N, PROGRESS_EVERY.

const REMOVAL_PROBES: [&str; 7] = ["god", "jesus", "lord", "love", "faith", "heaven", "christ"];
const SEARCH_PROBES: [&str; 7] = ["abraham", "moses", "david", "paul", "christ", "jerusalem", "israel"];

fn env_or(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Lowercased maximal runs of ASCII letters.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "BIBLE.txt".to_string());
    let degree = env_or("DEGREE", DEFAULT_DEGREE);
    let top_n = env_or("TOP_N", 10);
    let progress_every = env_or("PROGRESS_EVERY", 50_000).max(1);

    println!("=== Word Frequency ===");
    println!("File: {}, Degree: {}", path, degree);

    let mut tree = match CountedBTree::new(degree) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let text = match std::fs::read(&path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            eprintln!("Cannot read '{}': {}", path, e);
            std::process::exit(1);
        }
    };
    println!("Read in {:?}", start.elapsed());

    let words: Vec<String> = tokenize(&text).collect();
    println!("Words found: {}", words.len());

    // Insert every word
    println!("\nInserting words...");
    let insertion_start = Instant::now();
    for (i, word) in words.iter().enumerate() {
        tree.insert(word.clone());

        if (i + 1) % progress_every == 0 {
            let elapsed = insertion_start.elapsed().as_secs_f64();
            let rate = (i + 1) as f64 / elapsed.max(f64::EPSILON);
            let remaining = (words.len() - i - 1) as f64 / rate;
            println!(
                "  {} words... ({:.0} words/s, ~{:.0}s left)",
                i + 1,
                rate,
                remaining
            );
        }
    }
    let insertion_time = insertion_start.elapsed();
    println!("Insertion done in {:?}", insertion_time);

    // Remove one occurrence of each probe
    println!("\nRemoving probe words...");
    let removal_start = Instant::now();
    for word in REMOVAL_PROBES {
        let word = word.to_string();
        match tree.search(&word) {
            Some(count) => {
                println!("  Removing '{}' (occurrences: {})", word, count);
                tree.remove(&word);
            }
            None => println!("  '{}' not found", word),
        }
    }
    let removal_time = removal_start.elapsed();
    println!("Removal done in {:?}", removal_time);

    println!("\n=== Tree Statistics ===");
    println!("{}", tree.stats());
    println!("Insertion time: {:.4} ms", millis(insertion_time));
    if tree.total_insertions() > 0 {
        println!(
            "Average per insertion: {:.6} ms",
            millis(insertion_time) / tree.total_insertions() as f64
        );
    }
    println!("Removal time: {:.4} ms", millis(removal_time));

    println!("\nSearching probe words:");
    let mut total_search = Duration::ZERO;
    for word in SEARCH_PROBES {
        let word = word.to_string();
        let start = Instant::now();
        let found = tree.search(&word);
        let elapsed = start.elapsed();
        total_search += elapsed;

        match found {
            Some(count) => println!(
                "  '{}': {} occurrences ({:.4} ms)",
                word,
                count,
                millis(elapsed)
            ),
            None => println!("  '{}': not found ({:.4} ms)", word, millis(elapsed)),
        }
    }
    println!(
        "Average search time: {:.4} ms",
        millis(total_search) / SEARCH_PROBES.len() as f64
    );

    println!("\n{} most frequent words:", top_n);
    for (rank, (word, count)) in tree.most_frequent(top_n).into_iter().enumerate() {
        println!("  {}. '{}': {} occurrences", rank + 1, word, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_letter_runs() {
        let words: Vec<_> = tokenize("In the beginning, God created; the HEAVEN & earth1:1").collect();
        assert_eq!(
            words,
            vec!["in", "the", "beginning", "god", "created", "the", "heaven", "earth"]
        );
    }

    #[test]
    fn test_tokenize_splits_on_apostrophes_and_digits() {
        let words: Vec<_> = tokenize("Lord's 3rd day").collect();
        assert_eq!(words, vec!["lord", "s", "rd", "day"]);
        assert_eq!(tokenize("  12 ;; ").count(), 0);
    }

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("COUNTED_BTREE_UNSET_VARIABLE", 7), 7);
    }
}
