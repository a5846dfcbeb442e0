//! User filter criteria and the canonical search query built from them.

/// Raw, unvalidated filter input.
///
/// Rating bounds stay as text so unparsable input can be reported as an
/// invalid filter rather than rejected earlier by argument parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub title_types: Vec<String>,
    pub release_date_from: Option<String>,
    pub release_date_to: Option<String>,
    pub genres: Vec<String>,
    pub min_user_rating: Option<String>,
    pub max_user_rating: Option<String>,
    pub country: Option<String>,
}

/// Validated search parameters plus the pagination cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub title_type: Option<String>,
    pub release_date: Option<String>,
    pub genres: Option<String>,
    pub user_rating: Option<String>,
    pub countries: Option<String>,
    /// 1-based position of the next item to request.
    pub offset: u32,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            title_type: None,
            release_date: None,
            genres: None,
            user_rating: None,
            countries: None,
            offset: 1,
        }
    }
}

impl Query {
    /// Parameter names a query may ever send.
    pub const KEYS: [&'static str; 6] = [
        "title_type",
        "release_date",
        "genres",
        "user_rating",
        "countries",
        "start",
    ];

    /// Query-string pairs for the current cursor position, in a stable order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let filters = [
            ("title_type", &self.title_type),
            ("release_date", &self.release_date),
            ("genres", &self.genres),
            ("user_rating", &self.user_rating),
            ("countries", &self.countries),
        ];
        let mut params: Vec<(&'static str, String)> = filters
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
            .collect();
        params.push(("start", self.offset.to_string()));
        params
    }

    /// Move the cursor past `count` items.
    pub fn advance(&mut self, count: u32) {
        self.offset += count;
    }
}
