/// Query-string parameters sent with a collection fetch.
///
/// Server-side filters follow the backend's Ransack convention, so
/// `contains("title", "lift")` becomes `q[title_cont]=lift`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemoteQuery {
    params: Vec<(String, String)>,
}

impl RemoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain parameter such as `company_id=1`.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Ransack predicate `q[<field>_<predicate>]`. Blank values are skipped.
    pub fn predicate(mut self, field: &str, predicate: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.trim().is_empty() {
            self.params
                .push((format!("q[{field}_{predicate}]"), value.trim().to_string()));
        }
        self
    }

    pub fn contains(self, field: &str, value: impl ToString) -> Self {
        self.predicate(field, "cont", value)
    }

    pub fn equals(self, field: &str, value: impl ToString) -> Self {
        self.predicate(field, "eq", value)
    }

    pub fn page(self, page: usize) -> Self {
        self.param("page", page.max(1))
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
