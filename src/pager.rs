//! Paged table loading
//!
//! `TablePager` keeps the page cursor, sort order and the rows of the page
//! last loaded. Rows come from a caller-supplied `TableLoader`, so transport
//! stays outside the crate. Every page or size change that fails to load
//! rolls the cursor back to the last page that did load.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{MenuTreeError, MenuTreeResult};

/// Page size used when none (or a non-positive one) is given
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Sort order sent with a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default)]
    pub asc: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_aggregate_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParam {
    pub page_num: i64,
    pub page_size: i64,
}

/// Parameters handed to the loader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParam {
    /// Present only when a sort field is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_param: Option<Vec<OrderInfo>>,
    /// Present only for paged tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_param: Option<PageParam>,
}

/// One page of rows plus the total row count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub data_list: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> PageResult<T> {
    pub fn new(data_list: Vec<T>, total_count: u64) -> Self {
        Self {
            data_list,
            total_count,
        }
    }
}

/// Source of table rows
pub trait TableLoader<T> {
    fn load_table_data(&mut self, params: &RequestParam) -> anyhow::Result<PageResult<T>>;
}

impl<T, F> TableLoader<T> for F
where
    F: FnMut(&RequestParam) -> anyhow::Result<PageResult<T>>,
{
    fn load_table_data(&mut self, params: &RequestParam) -> anyhow::Result<PageResult<T>> {
        self(params)
    }
}

/// Construction options for a `TablePager`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerOptions {
    pub paged: bool,
    pub page_size: i64,
    pub order_field_name: Option<String>,
    pub ascending: bool,
    pub date_aggregate_by: Option<String>,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            paged: true,
            page_size: DEFAULT_PAGE_SIZE,
            order_field_name: None,
            ascending: false,
            date_aggregate_by: None,
        }
    }
}

type Verifier = Box<dyn Fn() -> bool>;

pub struct TablePager<T, L: TableLoader<T>> {
    loader: L,
    verify: Option<Verifier>,
    paged: bool,
    order: OrderInfo,
    current_page: i64,
    page_size: i64,
    total_count: u64,
    data_list: Vec<T>,
    // Cursor of the last successful load; 0 means nothing loaded yet.
    loaded_page: i64,
    loaded_page_size: i64,
}

fn checked_page_size(size: i64) -> i64 {
    if size <= 0 {
        warn!(
            size,
            default = DEFAULT_PAGE_SIZE,
            "page size must be positive, using default"
        );
        DEFAULT_PAGE_SIZE
    } else {
        size
    }
}

impl<T, L: TableLoader<T>> TablePager<T, L> {
    pub fn new(loader: L, options: PagerOptions) -> Self {
        let page_size = checked_page_size(options.page_size);
        Self {
            loader,
            verify: None,
            paged: options.paged,
            order: OrderInfo {
                field_name: options.order_field_name,
                asc: options.ascending,
                date_aggregate_by: options.date_aggregate_by,
            },
            current_page: 1,
            page_size,
            total_count: 0,
            data_list: Vec::new(),
            loaded_page: 0,
            loaded_page_size: page_size,
        }
    }

    /// Hook consulted by `refresh(true, ..)` before a new search.
    pub fn with_verifier(mut self, verify: impl Fn() -> bool + 'static) -> Self {
        self.verify = Some(Box::new(verify));
        self
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn data_list(&self) -> &[T] {
        &self.data_list
    }

    pub fn order(&self) -> &OrderInfo {
        &self.order
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn request_param(&self, page_num: i64, page_size: i64) -> RequestParam {
        RequestParam {
            order_param: self
                .order
                .field_name
                .is_some()
                .then(|| vec![self.order.clone()]),
            page_param: self.paged.then_some(PageParam {
                page_num,
                page_size,
            }),
        }
    }

    fn load_data(&mut self, page_num: i64, page_size: i64, reload: bool) -> MenuTreeResult<()> {
        if self.paged
            && !reload
            && self.loaded_page == page_num
            && self.loaded_page_size == page_size
        {
            debug!(page_num, page_size, "page already loaded, skipping");
            return Ok(());
        }
        if self.paged {
            debug!(page_num, page_size, reload, "loading table data");
        } else {
            debug!(reload, "loading table data without paging");
        }

        let params = self.request_param(page_num, page_size);
        let page = self
            .loader
            .load_table_data(&params)
            .map_err(MenuTreeError::Load)?;
        info!(
            rows = page.data_list.len(),
            total = page.total_count,
            "table data loaded"
        );
        self.data_list = page.data_list;
        self.total_count = page.total_count;
        Ok(())
    }

    /// Switch page size; loads page 1 and keeps the old size on failure.
    pub fn on_page_size_change(&mut self, size: i64) -> MenuTreeResult<()> {
        let size = checked_page_size(size);
        if size == self.page_size {
            return Ok(());
        }
        self.load_data(1, size, false)?;
        self.page_size = size;
        self.current_page = 1;
        self.loaded_page = 1;
        self.loaded_page_size = size;
        Ok(())
    }

    /// Move to `page`; the cursor stays put if loading fails.
    pub fn on_current_page_change(&mut self, page: i64) -> MenuTreeResult<()> {
        if page == self.current_page {
            return Ok(());
        }
        self.load_data(page, self.page_size, false)?;
        self.current_page = page;
        self.loaded_page = page;
        Ok(())
    }

    /// Apply a column sort. `prop` wins over `field`; `"ascending"` and
    /// `"asc"` sort ascending, anything else descending.
    pub fn on_sort_change(
        &mut self,
        prop: Option<&str>,
        field: Option<&str>,
        order: Option<&str>,
    ) -> MenuTreeResult<()> {
        self.order.field_name = prop.or(field).map(str::to_string);
        self.order.asc = matches!(order, Some("ascending" | "asc"));
        self.refresh(false, None)
    }

    /// Reload table data.
    ///
    /// With `research` the verifier runs first and the load is forced. A
    /// `page_num` other than the current page moves the cursor there; without
    /// one the current page is reloaded.
    pub fn refresh(&mut self, research: bool, page_num: Option<i64>) -> MenuTreeResult<()> {
        let mut reload = false;
        if research {
            if !self.verify.as_ref().map_or(true, |verify| verify()) {
                debug!("table refresh rejected by verifier");
                return Err(MenuTreeError::VerifyRejected);
            }
            reload = true;
        }

        match page_num {
            Some(page) if page != 0 && page != self.current_page => {
                match self.load_data(page, self.page_size, reload) {
                    Ok(()) => {
                        self.current_page = page;
                        self.loaded_page = page;
                        Ok(())
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to load table data");
                        self.current_page = self.loaded_page.max(1);
                        Err(e)
                    }
                }
            }
            _ => self
                .load_data(self.current_page, self.page_size, true)
                .inspect_err(|e| warn!(error = %e, "failed to load table data")),
        }
    }

    /// 1-based row number of the `index`-th row of the current page
    pub fn table_index(&self, index: usize) -> i64 {
        let offset = if self.paged {
            (self.current_page - 1) * self.page_size
        } else {
            0
        };
        offset + index as i64 + 1
    }

    pub fn clear(&mut self) {
        self.loaded_page = 0;
        self.current_page = 1;
        self.total_count = 0;
        self.data_list.clear();
    }
}
