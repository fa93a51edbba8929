use serde::Deserialize;
use validator::Validate;

use crate::forms::FormError;
use crate::list::{ListQuery, SortDirection, SortOrder};

#[derive(Debug, Default, Deserialize, Validate)]
/// Query-string parameters of a list page.
pub struct ListQueryForm {
    /// Free-text search entered by the user.
    #[validate(length(max = 200))]
    pub search: Option<String>,
    /// Column to sort by.
    #[validate(length(min = 1, max = 64))]
    pub sort: Option<String>,
    /// `asc` or `desc`; ascending when omitted.
    pub direction: Option<String>,
    /// Requested page, 1-based.
    #[validate(range(min = 1))]
    pub page: Option<usize>,
}

/// Validated list parameters.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListQueryPayload {
    pub search: Option<String>,
    pub sort: Option<SortOrder>,
    pub page: Option<usize>,
}

impl TryFrom<ListQueryForm> for ListQueryPayload {
    type Error = FormError;

    fn try_from(form: ListQueryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let search = form
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let direction = match form.direction.as_deref() {
            Some(raw) => raw
                .parse::<SortDirection>()
                .map_err(|_| FormError::InvalidSortDirection)?,
            None => SortDirection::Asc,
        };

        let sort = form
            .sort
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(|key| SortOrder { key, direction });

        Ok(Self {
            search,
            sort,
            page: form.page,
        })
    }
}

impl ListQueryPayload {
    /// Builds the controller query. `fallback_page` is used when the request
    /// named no page, e.g. the page remembered from the last visit.
    pub fn into_query(self, page_size: usize, fallback_page: Option<usize>) -> ListQuery {
        let mut query = ListQuery::new(page_size);
        if let Some(term) = self.search {
            query.set_search_term(term);
        }
        if let Some(order) = self.sort {
            query.set_sort(order.key, order.direction);
        }
        if let Some(page) = self.page.or(fallback_page) {
            query.set_page(page);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_search_and_parses_direction() {
        let form = ListQueryForm {
            search: Some("  lift ".into()),
            sort: Some("title".into()),
            direction: Some("DESC".into()),
            page: Some(2),
        };

        let payload = ListQueryPayload::try_from(form).expect("valid form");

        assert_eq!(payload.search.as_deref(), Some("lift"));
        assert_eq!(
            payload.sort,
            Some(SortOrder {
                key: "title".into(),
                direction: SortDirection::Desc,
            })
        );
        assert_eq!(payload.page, Some(2));
    }

    #[test]
    fn blank_search_is_dropped() {
        let form = ListQueryForm {
            search: Some("   ".into()),
            ..ListQueryForm::default()
        };
        let payload = ListQueryPayload::try_from(form).expect("valid form");
        assert_eq!(payload.search, None);
    }

    #[test]
    fn zero_page_fails_validation() {
        let form = ListQueryForm {
            page: Some(0),
            ..ListQueryForm::default()
        };
        assert!(matches!(
            ListQueryPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let form = ListQueryForm {
            sort: Some("title".into()),
            direction: Some("sideways".into()),
            ..ListQueryForm::default()
        };
        assert!(matches!(
            ListQueryPayload::try_from(form),
            Err(FormError::InvalidSortDirection)
        ));
    }

    #[test]
    fn explicit_page_beats_remembered_page() {
        let explicit = ListQueryPayload {
            page: Some(4),
            ..ListQueryPayload::default()
        };
        assert_eq!(explicit.into_query(10, Some(2)).page(), 4);

        let remembered = ListQueryPayload::default();
        assert_eq!(remembered.into_query(10, Some(2)).page(), 2);
    }

    #[test]
    fn search_and_sort_survive_page_restore() {
        let payload = ListQueryPayload {
            search: Some("pool".into()),
            sort: Some(SortOrder {
                key: "title".into(),
                direction: SortDirection::Asc,
            }),
            page: None,
        };
        let query = payload.into_query(15, Some(3));
        assert_eq!(query.search_term(), "pool");
        assert_eq!(query.page(), 3);
        assert_eq!(query.page_size(), 15);
    }
}
