use futures::StreamExt;
use futures::stream::{self, BoxStream};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::Error;
use crate::executor::Executor;
use crate::request::{FIRST_PAGE, RequestDescriptor, as_page_number};

/// Lazy stream of response pages. Each item is a full response body.
///
/// The stream ends after the last page or after the first error.
pub type PageStream = BoxStream<'static, Result<Value, Error>>;

struct PageCursor {
    executor: Executor,
    descriptor: RequestDescriptor,
    current_page: u64,
    exhausted: bool,
}

pub(crate) fn page_stream(executor: Executor, mut descriptor: RequestDescriptor) -> PageStream {
    if !descriptor.is_get() {
        return stream::empty().boxed();
    }

    let current_page = descriptor.page().unwrap_or(FIRST_PAGE);
    descriptor.set_page(current_page);

    let cursor = PageCursor {
        executor,
        descriptor,
        current_page,
        exhausted: false,
    };

    stream::unfold(cursor, |mut cursor| async move {
        if cursor.exhausted {
            return None;
        }

        cursor.descriptor.set_page(cursor.current_page);
        trace!(
            path = cursor.descriptor.path(),
            page = cursor.current_page,
            "fetching page"
        );

        let result = cursor.executor.execute(cursor.descriptor.clone()).await;
        match result {
            Ok(page) => {
                if is_last_page(&page, cursor.current_page) {
                    cursor.exhausted = true;
                } else {
                    cursor.current_page += 1;
                }
                Some((Ok(page), cursor))
            }
            Err(err) => {
                cursor.exhausted = true;
                Some((Err(err), cursor))
            }
        }
    })
    .boxed()
}

/// Pagination metadata lives under `data.meta`; a top-level `meta` is accepted too.
fn pagination_meta(body: &Value) -> Option<&Map<String, Value>> {
    body.get("data")
        .and_then(|data| data.get("meta"))
        .or_else(|| body.get("meta"))
        .and_then(Value::as_object)
}

/// A page is the last one unless the metadata names a later page.
///
/// The requested page is a lower bound for the current one, so a server
/// that ignores `page` still ends the stream once `totalPage` is reached.
fn is_last_page(body: &Value, requested_page: u64) -> bool {
    let Some(meta) = pagination_meta(body) else {
        return true;
    };
    let Some(total_pages) = meta.get("totalPage").and_then(as_page_number) else {
        return true;
    };
    let current_page = meta
        .get("currentPage")
        .and_then(as_page_number)
        .map_or(requested_page, |page| page.max(requested_page));
    current_page >= total_pages
}
