use std::time::{Duration, Instant};

/// Accumulating type-ahead buffer. Owned by one widget instance.
///
/// The reset timer is a deadline: each keystroke cancels the pending reset and
/// schedules a new one `quiet_period` later. The reset fires when a later
/// keystroke or `expire` observes that the deadline has passed.
#[derive(Clone, Debug)]
pub struct TypeAhead {
    search: String,
    reset_at: Option<Instant>,
    quiet_period: Duration,
}

impl TypeAhead {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            search: String::new(),
            reset_at: None,
            quiet_period,
        }
    }

    /// Append `ch` and return the accumulated search string.
    pub fn push(&mut self, ch: char, now: Instant) -> &str {
        self.expire(now);
        self.search.push(ch);
        self.reset_at = Some(now + self.quiet_period);
        &self.search
    }

    /// Fire the pending reset if it is due. Returns true when the buffer was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(deadline) if now >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.reset_at = None;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn pending_reset(&self) -> Option<Instant> {
        self.reset_at
    }
}

fn starts_with_ignore_case(option: &str, filter: &str) -> bool {
    option.to_lowercase().starts_with(filter)
}

/// Options beginning with `filter` (case-insensitive, filter trimmed), minus `exclude`.
pub fn filter_options<'a, S: AsRef<str>>(
    options: &'a [S],
    filter: &str,
    exclude: &[&str],
) -> Vec<&'a str> {
    let filter = filter.trim().to_lowercase();
    options
        .iter()
        .map(AsRef::as_ref)
        .filter(|option| starts_with_ignore_case(option, &filter) && !exclude.contains(option))
        .collect()
}

/// First index matching `filter`, scanning from `start` and wrapping around.
///
/// Filters the rotated view and maps the first hit back to its position in
/// `options`. The first rotated position holding the matched name is the hit
/// itself, since any earlier equal name would have matched first.
fn first_rotated_match<S: AsRef<str>>(options: &[S], filter: &str, start: usize) -> Option<usize> {
    let len = options.len();
    let start = start % len;
    let rotated: Vec<&str> = options[start..]
        .iter()
        .chain(&options[..start])
        .map(AsRef::as_ref)
        .collect();
    let first = *filter_options(&rotated, filter, &[]).first()?;
    let offset = rotated.iter().position(|&option| option == first)?;
    Some((start + offset) % len)
}

/// Resolve a search string to an option index, starting the scan at `start`.
///
/// A prefix match wins. Failing that, a search made of one repeated letter
/// ("aaa") cycles through options starting with that letter.
pub fn resolve_index<S: AsRef<str>>(options: &[S], search: &str, start: usize) -> Option<usize> {
    if options.is_empty() {
        return None;
    }

    if let Some(idx) = first_rotated_match(options, search, start) {
        return Some(idx);
    }

    let mut chars = search.chars();
    let first = chars.next()?;
    if chars.all(|ch| ch == first) {
        let mut buf = [0u8; 4];
        return first_rotated_match(options, first.encode_utf8(&mut buf), start);
    }

    None
}
