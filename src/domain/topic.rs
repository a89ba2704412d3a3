use url::Url;

use crate::app::{HeadwireError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub url: Url,
}

/// Ordered, read-only mapping from topic name to feed address.
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    topics: Vec<Topic>,
}

impl TopicRegistry {
    pub fn new<I, N, U>(topics: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, U)>,
        N: Into<String>,
        U: AsRef<str>,
    {
        let mut parsed: Vec<Topic> = Vec::new();

        for (name, url) in topics {
            let name = name.into();
            if parsed.iter().any(|t| t.name == name) {
                return Err(HeadwireError::Config(format!("Duplicate topic: {}", name)));
            }
            let url = Url::parse(url.as_ref())?;
            parsed.push(Topic { name, url });
        }

        if parsed.is_empty() {
            return Err(HeadwireError::Config("No topics configured".into()));
        }

        Ok(Self { topics: parsed })
    }

    pub fn names(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    pub fn by_index(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let registry = TopicRegistry::new([
            ("World", "https://example.com/world.xml"),
            ("Business", "https://example.com/business.xml"),
            ("Sports", "https://example.com/sports.xml"),
        ])
        .unwrap();

        assert_eq!(registry.names(), vec!["World", "Business", "Sports"]);
        assert_eq!(registry.by_index(1).unwrap().name, "Business");
        assert!(registry.by_index(3).is_none());
    }

    #[test]
    fn test_lookup() {
        let registry = TopicRegistry::new([("Tech", "https://example.com/tech.xml")]).unwrap();
        assert_eq!(
            registry.get("Tech").unwrap().url.as_str(),
            "https://example.com/tech.xml"
        );
        assert!(registry.get("tech").is_none());
    }

    #[test]
    fn test_rejects_empty() {
        let topics: Vec<(String, String)> = Vec::new();
        assert!(matches!(
            TopicRegistry::new(topics),
            Err(HeadwireError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_url() {
        assert!(matches!(
            TopicRegistry::new([("Bad", "not a url")]),
            Err(HeadwireError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = TopicRegistry::new([
            ("India", "https://example.com/a.xml"),
            ("India", "https://example.com/b.xml"),
        ]);
        assert!(matches!(result, Err(HeadwireError::Config(_))));
    }
}
