use crate::error::{Result, WalletError};
use std::str::FromStr;

/// Ordered, de-duplicated seed-node URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeList {
    urls: Vec<String>,
}

impl NodeList {
    /// Splits on `,`, trims each entry and drops empties and repeats
    pub fn parse(comma_separated_urls: &str) -> Result<NodeList> {
        Self::from_urls(comma_separated_urls.split(','))
    }

    pub fn from_urls<I, S>(urls: I) -> Result<NodeList>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for url in urls {
            let url = url.as_ref().trim();
            if !url.is_empty() && !list.iter().any(|existing| existing == url) {
                list.push(url.to_string());
            }
        }
        if list.is_empty() {
            return Err(WalletError::EmptyNodeList);
        }
        Ok(NodeList { urls: list })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Position of `url` in the list, used to order probe outcomes
    pub fn position(&self, url: &str) -> Option<usize> {
        self.urls.iter().position(|u| u == url)
    }
}

impl FromStr for NodeList {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        NodeList::parse(s)
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}
