//! Per-item data: listing stubs, detail fields and the flattened output record.

/// Literal written for any field that could not be located.
pub const ABSENT: &str = "Null";

/// One row of a listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStub {
    /// Site-assigned rank text, e.g. "12.".
    pub index: String,
    pub name: String,
    /// Absolute URL of the detail document.
    pub link: String,
    pub genre: Option<String>,
    pub rating: Option<String>,
}

/// The three labelled text sections of a detail document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailBlocks {
    pub details: Option<String>,
    pub box_office: Option<String>,
    pub tech_specs: Option<String>,
}

/// Fields extracted from a detail document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    pub title_type: Option<String>,
    pub stars: Option<String>,
    pub blocks: DetailBlocks,
}

/// One output row. Column order is fixed by [`Record::COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub index: String,
    pub name: String,
    pub link: String,
    pub genres: String,
    pub rating: String,
    pub title_type: String,
    pub stars: String,
    pub details: String,
    pub box_office: String,
    pub tech_specs: String,
}

fn or_absent(value: Option<String>) -> String {
    value.unwrap_or_else(|| ABSENT.to_string())
}

impl Record {
    pub const COLUMNS: [&'static str; 10] = [
        "index",
        "name",
        "link",
        "genres",
        "rating",
        "type",
        "stars",
        "details",
        "box_office",
        "tech_specs",
    ];

    /// Flatten a stub and its detail fields. Pure; no I/O.
    pub fn assemble(stub: ItemStub, details: DetailFields) -> Self {
        Self {
            index: stub.index,
            name: stub.name,
            link: stub.link,
            genres: or_absent(stub.genre),
            rating: or_absent(stub.rating),
            title_type: or_absent(details.title_type),
            stars: or_absent(details.stars),
            details: or_absent(details.blocks.details),
            box_office: or_absent(details.blocks.box_office),
            tech_specs: or_absent(details.blocks.tech_specs),
        }
    }

    /// Field values in column order.
    pub fn fields(&self) -> [&str; 10] {
        [
            self.index.as_str(),
            self.name.as_str(),
            self.link.as_str(),
            self.genres.as_str(),
            self.rating.as_str(),
            self.title_type.as_str(),
            self.stars.as_str(),
            self.details.as_str(),
            self.box_office.as_str(),
            self.tech_specs.as_str(),
        ]
    }
}
