//! Incremental loading of the inventory item list.
//!
//! The controller owns the pagination cursor, accumulates fetched pages
//! into a growing list of display rows, and decides when a near-end signal
//! from the rendering surface may start the next fetch. A single in-flight
//! latch enforces at most one outstanding page fetch; a generation counter
//! makes results from before a reset detectable so they are discarded
//! instead of applied.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use vitrina_core::{ItemRow, UserId};

use crate::api::{ApiError, MerchantApi};

/// Where the controller currently is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// No session or credentials not configured; nothing loaded.
    Idle,
    /// One page fetch outstanding.
    Loading,
    /// Awaiting the next trigger; `has_more` says whether one can fire.
    Ready,
}

/// What a trigger call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched and its rows appended.
    Fetched { appended: usize },
    /// The trigger was ignored (guard held, end of data, or idle).
    Skipped,
    /// The fetch finished after a reset invalidated it; result discarded.
    Stale,
}

/// Cheap copy of the accumulated list for display and filtering.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub phase: ListPhase,
    pub rows: Vec<ItemRow>,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Debug)]
struct ListState {
    phase: ListPhase,
    rows: Vec<ItemRow>,
    offset: usize,
    has_more: bool,
    in_flight: bool,
    generation: u64,
}

impl ListState {
    const fn new() -> Self {
        Self {
            phase: ListPhase::Idle,
            rows: Vec::new(),
            offset: 0,
            has_more: true,
            in_flight: false,
            generation: 0,
        }
    }
}

/// Owns pagination state and drives the API for paged reads.
///
/// All methods take `&self`; state lives behind a mutex that is never held
/// across an await.
pub struct ItemListController<A> {
    api: A,
    user_id: UserId,
    page_size: usize,
    state: Mutex<ListState>,
}

impl<A: MerchantApi> ItemListController<A> {
    /// Create an idle controller.
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    pub fn new(api: A, user_id: UserId, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            api,
            user_id,
            page_size,
            state: Mutex::new(ListState::new()),
        }
    }

    /// The identity this controller lists items for.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Begin loading once credentials become configured.
    ///
    /// Only acts from `Idle` with an empty list; otherwise the call is a
    /// no-op reported as [`FetchOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// Returns the page-fetch error; state stays resumable (see
    /// [`Self::notify_near_end`]).
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn activate(&self) -> Result<FetchOutcome, ApiError> {
        {
            let mut state = self.state();
            if state.phase != ListPhase::Idle || !state.rows.is_empty() {
                return Ok(FetchOutcome::Skipped);
            }
            state.phase = ListPhase::Ready;
        }
        self.fetch_next_page().await
    }

    /// Scroll-proximity trigger: the rendering surface reports that the
    /// sentinel region near the end of the rendered list became visible.
    ///
    /// Ignored unless the controller is `Ready`, more data is expected, and
    /// no fetch is outstanding. Repeated signals while a fetch is
    /// outstanding are all ignored.
    ///
    /// # Errors
    ///
    /// A failed fetch leaves the cursor and `has_more` untouched and clears
    /// the latch, so the same page boundary is retried on the next signal.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn notify_near_end(&self) -> Result<FetchOutcome, ApiError> {
        self.fetch_next_page().await
    }

    /// Full reset: cursor to 0, list cleared, `has_more` true, latch and
    /// any outstanding fetch invalidated, then immediately reload the
    /// first page.
    ///
    /// # Errors
    ///
    /// Returns the reload error; the reset itself always happens.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn reset_and_reload(&self) -> Result<FetchOutcome, ApiError> {
        {
            let mut state = self.state();
            state.generation += 1;
            state.rows.clear();
            state.offset = 0;
            state.has_more = true;
            state.in_flight = false;
            state.phase = ListPhase::Ready;
            debug!(generation = state.generation, "List reset");
        }
        self.fetch_next_page().await
    }

    /// Drop back to `Idle`, e.g. on logout or credentials becoming
    /// unconfigured. Outstanding fetch results are invalidated.
    pub fn deactivate(&self) {
        let mut state = self.state();
        let generation = state.generation + 1;
        *state = ListState::new();
        state.generation = generation;
    }

    /// Copy of the current rows and flags.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.state();
        ListSnapshot {
            phase: state.phase,
            rows: state.rows.clone(),
            offset: state.offset,
            has_more: state.has_more,
        }
    }

    async fn fetch_next_page(&self) -> Result<FetchOutcome, ApiError> {
        let (generation, offset) = {
            let mut state = self.state();
            if state.phase == ListPhase::Idle
                || state.in_flight
                || !state.has_more
            {
                return Ok(FetchOutcome::Skipped);
            }
            state.in_flight = true;
            state.phase = ListPhase::Loading;
            (state.generation, state.offset)
        };

        let result = self
            .api
            .list_items(&self.user_id, self.page_size, offset)
            .await;

        let mut state = self.state();
        if state.generation != generation {
            // A reset happened while this fetch was outstanding; it already
            // cleared the latch and owns the state now.
            debug!(stale_generation = generation, "Dropping stale page fetch");
            return Ok(FetchOutcome::Stale);
        }

        state.in_flight = false;
        state.phase = ListPhase::Ready;

        match result {
            Ok(items) => {
                let appended = items.len();
                state.has_more = appended >= self.page_size;
                state.offset += self.page_size;
                state.rows.extend(items.iter().map(ItemRow::project));
                debug!(appended, offset = state.offset, has_more = state.has_more, "Page appended");
                Ok(FetchOutcome::Fetched { appended })
            }
            // Cursor and has_more untouched; the next trigger retries the
            // same page boundary.
            Err(error) => Err(error),
        }
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Client-side filter over the accumulated list. All criteria are ANDed;
/// unset criteria match everything. Never triggers additional requests.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Case-insensitive substring match on the SKU.
    pub sku_contains: Option<String>,
    /// Exact match on the combined category label.
    pub category_label: Option<String>,
    /// Exact match on the price in major units.
    pub price_major: Option<Decimal>,
    /// Inclusive day-granularity range on the modification date.
    pub modified_range: Option<(NaiveDate, NaiveDate)>,
}

impl ItemFilter {
    /// Whether a row passes every set criterion.
    #[must_use]
    pub fn matches(&self, row: &ItemRow) -> bool {
        if let Some(needle) = &self.sku_contains {
            let Some(sku) = &row.sku else { return false };
            if !sku.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if let Some(label) = &self.category_label
            && row.category_label != *label
        {
            return false;
        }

        if let Some(price) = self.price_major
            && Decimal::new(row.price, 2) != price
        {
            return false;
        }

        if let Some((start, end)) = self.modified_range {
            let day = row.modified_time.date_naive();
            if day < start || day > end {
                return false;
            }
        }

        true
    }

    /// Filter a snapshot's rows.
    #[must_use]
    pub fn apply(&self, rows: &[ItemRow]) -> Vec<ItemRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
