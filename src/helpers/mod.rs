//! Helper functions shared by the layout, routing and feed code

mod date;
mod tags;
mod url;

pub use date::*;
pub use tags::*;
pub use self::url::*;

/// `1 post`, `3 posts`
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0, "post"), "0 posts");
        assert_eq!(count_label(1, "post"), "1 post");
        assert_eq!(count_label(12, "post"), "12 posts");
    }
}
