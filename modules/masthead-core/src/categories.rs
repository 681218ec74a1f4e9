/// One magazine section, backed by a taxonomy id on the content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub slug: &'static str,
    pub name: &'static str,
    pub id: u32,
}

impl Category {
    /// `life` never got a taxonomy id assigned upstream; an id of 0 marks a
    /// section that exists editorially but cannot be queried yet.
    pub fn is_configured(&self) -> bool {
        self.id != 0
    }
}

pub const CATEGORIES: &[Category] = &[
    Category {
        slug: "tech",
        name: "Tech",
        id: 4,
    },
    Category {
        slug: "culture",
        name: "Culture",
        id: 17,
    },
    Category {
        slug: "branding",
        name: "Branding",
        id: 13,
    },
    Category {
        slug: "life",
        name: "Life",
        id: 0,
    },
];

pub fn by_slug(slug: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.slug == slug)
}
