use rustc_hash::FxHashMap;

use crate::entry::FilterEntry;
use crate::entry::TagEntry;

/// Ordered, immutable collection of tags and filters keyed by name.
///
/// Iteration follows declaration order. Lookups go through a name index
/// built once at construction; when a name is declared twice in the same
/// sequence the first declaration is the one found.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tags: Vec<TagEntry>,
    filters: Vec<FilterEntry>,
    tag_index: FxHashMap<String, usize>,
    filter_index: FxHashMap<String, usize>,
}

/// A catalog entry of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct<'a> {
    Tag(&'a TagEntry),
    Filter(&'a FilterEntry),
}

impl Construct<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Construct::Tag(tag) => tag.name(),
            Construct::Filter(filter) => filter.name(),
        }
    }

    #[must_use]
    pub fn documentation(&self) -> String {
        match self {
            Construct::Tag(tag) => tag.documentation(),
            Construct::Filter(filter) => filter.documentation(),
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn new(tags: Vec<TagEntry>, filters: Vec<FilterEntry>) -> Self {
        let mut tag_index = FxHashMap::default();
        for (index, tag) in tags.iter().enumerate() {
            tag_index.entry(tag.name().to_string()).or_insert(index);
        }

        let mut filter_index = FxHashMap::default();
        for (index, filter) in filters.iter().enumerate() {
            filter_index
                .entry(filter.name().to_string())
                .or_insert(index);
        }

        Self {
            tags,
            filters,
            tag_index,
            filter_index,
        }
    }

    #[must_use]
    pub fn lookup_tag(&self, name: &str) -> Option<&TagEntry> {
        self.tag_index.get(name).map(|&index| &self.tags[index])
    }

    #[must_use]
    pub fn lookup_filter(&self, name: &str) -> Option<&FilterEntry> {
        self.filter_index.get(name).map(|&index| &self.filters[index])
    }

    /// Look a name up as a tag first, then as a filter.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Construct<'_>> {
        self.lookup_tag(name)
            .map(Construct::Tag)
            .or_else(|| self.lookup_filter(name).map(Construct::Filter))
    }

    #[must_use]
    pub fn tags(&self) -> &[TagEntry] {
        &self.tags
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterEntry] {
        &self.filters
    }
}
