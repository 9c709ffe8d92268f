use std::fmt;

use url::{form_urlencoded, Url};

pub const SORT_PARAM: &str = "sort";
pub const PER_PAGE_PARAM: &str = "per_page";
pub const PAGE_PARAM: &str = "page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    /// Value used for the `sort` address-bar parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }

    /// Ordering key sent to the collection API. Newest first is descending.
    pub fn api_key(self) -> &'static str {
        match self {
            SortOrder::Newest => "-published_at",
            SortOrder::Oldest => "published_at",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("newest") {
            Some(SortOrder::Newest)
        } else if raw.eq_ignore_ascii_case("oldest") {
            Some(SortOrder::Oldest)
        } else {
            None
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Twenty, PageSize::Fifty];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }

    pub fn from_count(count: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.get() == count)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().and_then(Self::from_count)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// User-controlled parameters selecting which page of which ordering is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryState {
    pub sort: SortOrder,
    pub page_size: PageSize,
    /// 1-based. Not range-checked until totals are known.
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            sort: SortOrder::default(),
            page_size: PageSize::default(),
            page: 1,
        }
    }
}

impl QueryState {
    /// Reads `sort`, `per_page` and `page` from a query string (leading `?`
    /// optional). Each missing or unparseable parameter falls back to its
    /// default independently; only the first occurrence of a key counts.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut sort = None;
        let mut page_size = None;
        let mut page = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                SORT_PARAM if sort.is_none() => sort = Some(SortOrder::parse(&value)),
                PER_PAGE_PARAM if page_size.is_none() => page_size = Some(PageSize::parse(&value)),
                PAGE_PARAM if page.is_none() => page = Some(parse_page(&value)),
                _ => {}
            }
        }

        Self {
            sort: sort.flatten().unwrap_or_default(),
            page_size: page_size.flatten().unwrap_or_default(),
            page: page.flatten().unwrap_or(1),
        }
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params())
            .finish()
    }

    fn params(&self) -> [(&'static str, String); 3] {
        [
            (SORT_PARAM, self.sort.as_param().to_string()),
            (PER_PAGE_PARAM, self.page_size.get().to_string()),
            (PAGE_PARAM, self.page.to_string()),
        ]
    }
}

fn parse_page(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|page| *page >= 1)
}

/// Writes `query` into `location`, replacing any previous `sort`, `per_page`
/// and `page` parameters and keeping every other parameter and the path.
pub fn merge_into_url(location: &Url, query: &QueryState) -> Url {
    let kept: Vec<(String, String)> = location
        .query_pairs()
        .filter(|(key, _)| !matches!(key.as_ref(), SORT_PARAM | PER_PAGE_PARAM | PAGE_PARAM))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = location.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .extend_pairs(query.params());
    url
}
