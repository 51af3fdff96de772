/// Returns the cache key for a single news item.
pub fn news_key(news_id: i64) -> String {
    format!("news:{}", news_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_key() {
        assert_eq!(news_key(42), "news:42");
    }

    #[test]
    fn test_news_keys_are_distinct_per_id() {
        assert_ne!(news_key(1), news_key(10));
    }
}
