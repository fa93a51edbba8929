//! Services that load a collection snapshot and shape it into a list page.

use serde::de::DeserializeOwned;

use crate::client::ResourceClient;
use crate::client::envelope::Envelope;
use crate::client::query::RemoteQuery;
use crate::domain::record::ListRecord;
use crate::domain::resource::ResourceDescriptor;
use crate::dto::list::ListPageData;
use crate::forms::list::{ListQueryForm, ListQueryPayload};
use crate::list::ListDataController;
use crate::repository::{PageStateReader, PageStateWriter};
use crate::services::ServiceResult;

/// Static description of one list page.
#[derive(Clone, Debug)]
pub struct ListPageOptions {
    /// Key under which the last visited page is remembered.
    pub list_key: String,
    /// Fields the search box matches against.
    pub search_fields: Vec<String>,
    pub page_size: usize,
}

impl ListPageOptions {
    pub fn new<S: Into<String>>(
        list_key: impl Into<String>,
        search_fields: impl IntoIterator<Item = S>,
        page_size: usize,
    ) -> Self {
        Self {
            list_key: list_key.into(),
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            page_size,
        }
    }
}

/// Decodes envelope rows into typed records.
///
/// Rows that do not match the record shape are skipped and logged so one
/// malformed entry does not blank the whole table.
pub fn decode_records<T: DeserializeOwned>(envelope: Envelope, collection: &str) -> Vec<T> {
    envelope
        .records
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("Skipping malformed {collection} row {index}: {err}");
                None
            }
        })
        .collect()
}

/// Fetches one snapshot of a collection.
pub async fn load_records<C, T>(
    client: &C,
    resource: &ResourceDescriptor,
    query: &RemoteQuery,
) -> ServiceResult<Vec<T>>
where
    C: ResourceClient + ?Sized,
    T: DeserializeOwned,
{
    let envelope = client
        .fetch_collection(resource, query)
        .await
        .map_err(|err| {
            log::error!("Failed to fetch {}: {err}", resource.collection);
            err
        })?;

    Ok(decode_records(envelope, resource.collection.as_str()))
}

/// Refetches a collection into `controller`, ignoring the result if a newer
/// refresh was started in the meantime.
///
/// Returns whether the fetched records were applied.
pub async fn refresh_list<C, T>(
    client: &C,
    resource: &ResourceDescriptor,
    query: &RemoteQuery,
    controller: &mut ListDataController<T>,
) -> ServiceResult<bool>
where
    C: ResourceClient + ?Sized,
    T: DeserializeOwned + ListRecord + Send,
{
    let ticket = controller.begin_fetch();
    let records = load_records(client, resource, query).await?;
    Ok(controller.apply_fetch(ticket, records))
}

/// Loads a collection and renders the requested page of it.
///
/// When the request names no page, the page remembered for this list is
/// restored. The page actually shown is remembered for the next visit.
pub async fn load_list_page<C, T, S>(
    client: &C,
    resource: &ResourceDescriptor,
    remote: &RemoteQuery,
    options: &ListPageOptions,
    form: ListQueryForm,
    store: &S,
) -> ServiceResult<ListPageData<T>>
where
    C: ResourceClient + ?Sized,
    T: DeserializeOwned + ListRecord + Clone,
    S: PageStateReader + PageStateWriter + ?Sized,
{
    let payload = ListQueryPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate list query: {err}");
        err
    })?;
    let search_query = payload.search.clone();
    let query = payload.into_query(options.page_size, store.saved_page(&options.list_key));

    let records: Vec<T> = load_records(client, resource, remote).await?;

    let mut controller =
        ListDataController::new(options.search_fields.iter().cloned(), options.page_size)
            .with_records(records);
    controller.apply_query(query);

    let result = controller.view().map(Clone::clone);
    store.save_page(&options.list_key, result.page);

    Ok(ListPageData::new(result, search_query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::errors::ClientError;
    use crate::client::mock::MockResourceClient;
    use crate::domain::banner::Banner;
    use crate::dto::list::EMPTY_LIST_MESSAGE;
    use crate::repository::InMemoryPageStore;
    use crate::services::ServiceError;
    use serde_json::{Value, json};

    fn banner_rows(count: i64) -> Vec<Value> {
        (1..=count)
            .map(|id| json!({ "id": id, "title": format!("Banner {id}"), "active": id % 2 == 0 }))
            .collect()
    }

    fn client_returning(rows: Vec<Value>) -> MockResourceClient {
        let mut client = MockResourceClient::new();
        client
            .expect_fetch_collection()
            .withf(|resource, _| resource.collection.as_str() == "banners")
            .times(1)
            .returning(move |_, _| {
                Ok(Envelope {
                    records: rows.clone(),
                    pagination: None,
                })
            });
        client
    }

    fn options() -> ListPageOptions {
        ListPageOptions::new("banner_list", ["title"], 10)
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let envelope = Envelope {
            records: vec![
                json!({ "id": 1, "title": "ok" }),
                json!({ "id": -1, "title": "bad id" }),
                json!("not an object"),
            ],
            pagination: None,
        };

        let banners: Vec<Banner> = decode_records(envelope, "banners");
        assert_eq!(banners.len(), 1);
    }

    #[tokio::test]
    async fn last_page_of_twenty_three_holds_three() {
        let client = client_returning(banner_rows(23));
        let store = InMemoryPageStore::new();
        let form = ListQueryForm {
            page: Some(3),
            ..ListQueryForm::default()
        };

        let data: ListPageData<Banner> = load_list_page(
            &client,
            &ResourceDescriptor::from_static("banners", "banner"),
            &RemoteQuery::new(),
            &options(),
            form,
            &store,
        )
        .await
        .expect("page loads");

        assert_eq!(data.result.total_pages, 3);
        assert_eq!(data.result.items.len(), 3);
        assert_eq!(data.result.items[0].title, "Banner 21");
        assert_eq!(store.saved_page("banner_list"), Some(3));
    }

    #[tokio::test]
    async fn remembered_page_is_restored() {
        let client = client_returning(banner_rows(23));
        let store = InMemoryPageStore::new();
        store.save_page("banner_list", 2);

        let data: ListPageData<Banner> = load_list_page(
            &client,
            &ResourceDescriptor::from_static("banners", "banner"),
            &RemoteQuery::new(),
            &options(),
            ListQueryForm::default(),
            &store,
        )
        .await
        .expect("page loads");

        assert_eq!(data.result.page, 2);
        assert_eq!(data.result.items[0].title, "Banner 11");
    }

    #[tokio::test]
    async fn search_without_matches_shows_empty_state() {
        let client = client_returning(banner_rows(5));
        let store = InMemoryPageStore::new();
        let form = ListQueryForm {
            search: Some("zzz".into()),
            ..ListQueryForm::default()
        };

        let data: ListPageData<Banner> = load_list_page(
            &client,
            &ResourceDescriptor::from_static("banners", "banner"),
            &RemoteQuery::new(),
            &options(),
            form,
            &store,
        )
        .await
        .expect("page loads");

        assert!(data.result.items.is_empty());
        assert_eq!(data.result.total_pages, 0);
        assert_eq!(data.empty_message, Some(EMPTY_LIST_MESSAGE));
        assert_eq!(data.search_query.as_deref(), Some("zzz"));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let mut client = MockResourceClient::new();
        client.expect_fetch_collection().times(0);
        let store = InMemoryPageStore::new();
        let form = ListQueryForm {
            page: Some(0),
            ..ListQueryForm::default()
        };

        let result: ServiceResult<ListPageData<Banner>> = load_list_page(
            &client,
            &ResourceDescriptor::from_static("banners", "banner"),
            &RemoteQuery::new(),
            &options(),
            form,
            &store,
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn fetch_failure_is_propagated() {
        let mut client = MockResourceClient::new();
        client
            .expect_fetch_collection()
            .times(1)
            .returning(|_, _| Err(ClientError::Transport("connection refused".into())));

        let result: ServiceResult<Vec<Banner>> = load_records(
            &client,
            &ResourceDescriptor::from_static("banners", "banner"),
            &RemoteQuery::new(),
        )
        .await;

        assert!(matches!(
            result,
            Err(ServiceError::Client(ClientError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot() {
        let client = client_returning(banner_rows(4));
        let mut controller: ListDataController<Banner> = ListDataController::new(["title"], 10);

        let applied = refresh_list(
            &client,
            &ResourceDescriptor::from_static("banners", "banner"),
            &RemoteQuery::new(),
            &mut controller,
        )
        .await
        .expect("refresh succeeds");

        assert!(applied);
        assert_eq!(controller.records().len(), 4);
    }
}
