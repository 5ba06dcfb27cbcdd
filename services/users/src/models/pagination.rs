//! Page/perPage handling for the list endpoint

/// Query parameters accepted by `GET /user`
///
/// Kept as raw strings: an empty value, `0`, or anything that is not a
/// positive integer means "use the default".
#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ListQuery {
    /// Build from decoded query pairs; a repeated key keeps its last value
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => query.page = Some(value),
                "perPage" => query.per_page = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Resolved 1-indexed page and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn from_query(query: &ListQuery, default_per_page: u32) -> Self {
        Self {
            page: positive(query.page.as_deref()).unwrap_or(1),
            per_page: positive(query.per_page.as_deref()).unwrap_or(default_per_page),
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)).saturating_mul(i64::from(self.per_page))
    }
}

/// Digits only; values past `u32::MAX` clamp rather than fall back
fn positive(raw: Option<&str>) -> Option<u32> {
    let value = raw?.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let parsed = value.parse::<u64>().unwrap_or(u64::MAX);
    if parsed == 0 {
        return None;
    }

    Some(u32::try_from(parsed).unwrap_or(u32::MAX))
}
