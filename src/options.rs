use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Options shown when no list file is given.
pub const DEFAULT_OPTIONS: &[&str] = &[
    "World War Z",
    "When a Crocodile Eats The Sun",
    "Tibet, Tibet",
    "Conversations with Friends",
    "I'm a Stranger Here Myself",
    "the lost continent",
    "Delhi: Adventures in a Megacity",
    "Favorite Folktales from around the World",
    "The Ramayana",
    "The Illustrated Premchand",
    "Tales and Legends of Ancient Burma",
    "Retelling Naga Narratives",
    "Burmese Monk's Tales",
    "Seducing the Rain God",
    "Best Indian Short Stories Vol. 1",
    "Unaccustomed Earth",
    "Swami and Friends, The Bachelor of Arts, The Dark Room, The English Teacher",
    "The Travelling Cat Chronicles",
    "A Dream of Red Mansions",
    "The Color of Law",
    "Collapse",
    "Ornamentalism",
    "When Crime Pays",
];

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read option list {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("option list {path} contains no options")]
    Empty { path: PathBuf },
}

pub fn default_options() -> Vec<String> {
    DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect()
}

/// Parse an option list: one option per line, blank lines and `#` comments skipped.
pub fn parse_options(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_options(path: &Path) -> Result<Vec<String>, OptionsError> {
    let content = fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let options = parse_options(&content);
    if options.is_empty() {
        return Err(OptionsError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(options)
}

/// Options named exactly (case-insensitive) in a comma-separated list.
/// Names without a match are dropped; each returned name is the option's own spelling.
pub fn find_matches(options: &[String], search: &str) -> Vec<String> {
    search
        .split(',')
        .filter_map(|name| {
            let name = name.trim().to_lowercase();
            options
                .iter()
                .find(|option| option.to_lowercase() == name)
                .cloned()
        })
        .collect()
}
