/// Root `<feed>` document of one activity query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFeed {
    pub id: String,
    pub title: String,
    pub entries: Vec<Entry>,
}

/// One activity event. Timestamps are kept exactly as the server sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Comment body as markup.
    pub content: String,
    pub published: String,
    pub updated: String,
    pub object: ItemRef,
    pub target: ItemRef,
    pub author: Author,
}

// <activity:object> / <activity:target>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Author {
    /// Display name as rendered in the feed; may be empty.
    pub name: String,
    /// Grouping key.
    pub username: String,
}
