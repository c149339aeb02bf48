use crate::config::{Config, FeedTuning};
use crate::feed::{
    ClipPlayback, FeedController, NavigationIntent, PlaybackDeck, SwipeTracker, WheelAccumulator,
};
use crate::keybindings::{Context, KeybindingRegistry};
use crate::listings::{FilterCriteria, Listing, ListingKind, ListingProvider, ProviderError};
use crate::theme::{ColorPalette, ThemeVariant};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

// ============================================================================
// Filter Panel Draft
// ============================================================================

/// Which field of the filter panel is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    City,
    MinPrice,
    MaxPrice,
    Kind,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            Self::City => Self::MinPrice,
            Self::MinPrice => Self::MaxPrice,
            Self::MaxPrice => Self::Kind,
            Self::Kind => Self::City,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::City => "City",
            Self::MinPrice => "Min price",
            Self::MaxPrice => "Max price",
            Self::Kind => "Type",
        }
    }
}

/// Editable draft of the filter criteria.
///
/// The draft holds raw text input; it only becomes `FilterCriteria` when
/// the user applies it. Unparseable price input is treated as unbounded.
#[derive(Debug, Clone)]
pub struct FilterDraft {
    pub field: FilterField,
    pub city: String,
    pub min_price: String,
    pub max_price: String,
    /// Index into `ListingKind::ALL`, or None for "any".
    pub kind: Option<usize>,
}

impl FilterDraft {
    /// Seed the draft from the currently applied criteria.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            field: FilterField::City,
            city: criteria.city.clone().unwrap_or_default(),
            min_price: criteria.price.min.map(|p| p.to_string()).unwrap_or_default(),
            max_price: criteria.price.max.map(|p| p.to_string()).unwrap_or_default(),
            kind: criteria
                .kind
                .and_then(|k| ListingKind::ALL.iter().position(|&c| c == k)),
        }
    }

    /// Convert the draft back into criteria. Empty or non-numeric price
    /// fields become unbounded.
    pub fn to_criteria(&self) -> FilterCriteria {
        let city = self.city.trim();
        FilterCriteria {
            city: (!city.is_empty()).then(|| city.to_string()),
            price: crate::listings::PriceRange {
                min: self.min_price.trim().parse().ok(),
                max: self.max_price.trim().parse().ok(),
            },
            kind: self.kind.map(|i| ListingKind::ALL[i]),
        }
    }

    /// Cycle the property-type field: any → Apartment → ... → Villa → any.
    pub fn cycle_kind(&mut self) {
        self.kind = match self.kind {
            None => Some(0),
            Some(i) if i + 1 < ListingKind::ALL.len() => Some(i + 1),
            Some(_) => None,
        };
    }

    /// Mutable reference to the text buffer of the focused field, if the
    /// focused field is text-editable.
    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FilterField::City => Some(&mut self.city),
            FilterField::MinPrice => Some(&mut self.min_price),
            FilterField::MaxPrice => Some(&mut self.max_price),
            FilterField::Kind => None,
        }
    }
}

// ============================================================================
// Overlays
// ============================================================================

/// Modal overlays. At most one is open; input is routed to it first.
pub enum Overlay {
    /// Filter panel with an editable draft.
    Filters(FilterDraft),
    /// Broker contact sheet for the active listing.
    Contact,
    /// Full listing details.
    Details,
    /// One-shot "get the app" prompt.
    DownloadPrompt,
    /// Keybinding help.
    Help { scroll: usize },
}

// ============================================================================
// Events from Background Tasks
// ============================================================================

pub enum AppEvent {
    /// A listing fetch finished.
    ///
    /// `generation` is the fetch generation at spawn time; stale results
    /// (user re-filtered while the fetch was in flight) are discarded.
    ListingsLoaded {
        generation: u64,
        result: Result<Vec<Listing>, ProviderError>,
    },
    /// The post-step cool-down timer fired.
    ///
    /// `generation` is the navigation generation at spawn time; a stale
    /// timer (another step or a feed reload happened since) is ignored.
    NavCooldownElapsed { generation: u64 },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    pub provider: Arc<dyn ListingProvider>,

    // Theme
    pub theme_variant: ThemeVariant,
    pub palette: ColorPalette,

    // Keybindings
    pub keybindings: KeybindingRegistry,

    // Data
    /// Listing sequence wrapped in Arc for O(1) cloning into fetch tasks.
    pub listings: Arc<Vec<Listing>>,

    // Feed state
    pub controller: FeedController,
    pub deck: PlaybackDeck,
    pub wheel: WheelAccumulator,
    pub swipe: SwipeTracker,
    pub tuning: FeedTuning,

    // Filters
    pub filters: FilterCriteria,

    // UI state
    pub overlay: Option<Overlay>,
    /// True while a listing fetch is in flight.
    pub loading: bool,

    /// Per-listing local toggles, keyed by listing ID.
    pub liked: HashSet<String>,
    pub saved: HashSet<String>,
    /// Followed brokers, keyed by broker name.
    pub followed: HashSet<String>,

    /// Status message with expiry — Cow avoids allocation for static literals.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,

    /// Generation counter for listing fetches to handle stale results.
    ///
    /// Incremented each time a fetch is spawned. When handling
    /// ListingsLoaded we reject results whose generation doesn't match,
    /// so a slow fetch can never overwrite a newer filter's results.
    pub fetch_generation: u64,

    /// Handle to the in-flight fetch task for cancellation.
    pub fetch_handle: Option<tokio::task::JoinHandle<()>>,

    /// Handle to the pending cool-down timer for cancellation.
    ///
    /// Aborted whenever a new step is accepted or the feed is reloaded, so
    /// an old timer can never end a newer transition early. The generation
    /// check on NavCooldownElapsed covers the race where the timer already
    /// fired before the abort.
    pub cooldown_handle: Option<tokio::task::JoinHandle<()>>,
}

impl App {
    pub fn new(provider: Arc<dyn ListingProvider>, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!(warning = %warning, "Keybinding override rejected");
        }

        let tuning = config.feed.clone();

        Self {
            provider,
            theme_variant,
            palette: theme_variant.palette(),
            keybindings,
            listings: Arc::new(Vec::new()),
            controller: FeedController::new(0, tuning.prompt_after),
            deck: PlaybackDeck::new(Vec::new()),
            wheel: WheelAccumulator::new(tuning.wheel_threshold),
            swipe: SwipeTracker::new(tuning.swipe_threshold),
            tuning,
            filters: FilterCriteria::default(),
            overlay: None,
            loading: false,
            liked: HashSet::new(),
            saved: HashSet::new(),
            followed: HashSet::new(),
            status_message: None,
            needs_redraw: true,
            fetch_generation: 0,
            fetch_handle: None,
            cooldown_handle: None,
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Route a navigation intent through the feed controller.
    ///
    /// On an accepted step this re-targets playback, arms the cool-down
    /// timer, and opens the one-shot download prompt when the controller
    /// says it is due. Dropped intents (mid-transition, out of bounds,
    /// empty feed) are no-ops.
    pub fn navigate(&mut self, intent: NavigationIntent, tx: &mpsc::UnboundedSender<AppEvent>) {
        let outcome = self.controller.apply(intent);
        let Some(step) = outcome.step else {
            return;
        };

        self.deck.activate(step.to);
        self.arm_cooldown(tx);

        if outcome.prompt {
            self.overlay = Some(Overlay::DownloadPrompt);
            tracing::info!(index = step.to, "Showing download prompt");
        }

        tracing::debug!(from = step.from, to = step.to, "Feed step accepted");
        self.needs_redraw = true;
    }

    /// Spawn (or replace) the cool-down timer for the current generation.
    fn arm_cooldown(&mut self, tx: &mpsc::UnboundedSender<AppEvent>) {
        if let Some(handle) = self.cooldown_handle.take() {
            handle.abort();
        }
        let generation = self.controller.generation();
        let cooldown = Duration::from_millis(self.tuning.nav_cooldown_ms);
        let tx = tx.clone();
        self.cooldown_handle = Some(tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;
            let _ = tx.send(AppEvent::NavCooldownElapsed { generation });
        }));
    }

    /// Handle a cool-down timer firing. Stale generations are ignored.
    pub fn on_cooldown_elapsed(&mut self, generation: u64) {
        if self.controller.cooldown_elapsed(generation) {
            self.needs_redraw = true;
        } else {
            tracing::trace!(generation, "Ignored stale cool-down timer");
        }
    }

    /// The listing under the active feed index.
    pub fn current_listing(&self) -> Option<&Listing> {
        self.listings.get(self.controller.active_index()?)
    }

    // ------------------------------------------------------------------
    // Listing fetches
    // ------------------------------------------------------------------

    /// Spawn a fetch for the current filter criteria, cancelling any fetch
    /// already in flight.
    pub fn spawn_fetch(&mut self, tx: &mpsc::UnboundedSender<AppEvent>) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
        self.fetch_generation += 1;
        self.loading = true;
        self.needs_redraw = true;

        let generation = self.fetch_generation;
        let provider = Arc::clone(&self.provider);
        let filter = self.filters.clone();
        let tx = tx.clone();
        self.fetch_handle = Some(tokio::spawn(async move {
            let result = provider.fetch(filter).await;
            let _ = tx.send(AppEvent::ListingsLoaded { generation, result });
        }));
    }

    /// Handle a completed fetch. A failed fetch yields an empty feed and a
    /// status message; the app keeps running either way.
    pub fn on_listings_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Listing>, ProviderError>,
    ) {
        if generation != self.fetch_generation {
            tracing::debug!(generation, "Discarded stale fetch result");
            return;
        }
        self.loading = false;

        match result {
            Ok(listings) => {
                tracing::info!(count = listings.len(), "Listings loaded");
                self.replace_listings(listings);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Listing fetch failed");
                self.replace_listings(Vec::new());
                self.set_status(format!("Failed to load listings: {}", e));
            }
        }
    }

    /// Swap in a new listing sequence.
    ///
    /// Resets the feed to the first item, rebuilds the playback deck, and
    /// cancels any pending cool-down (its generation is now stale anyway).
    /// The download-prompt latch is deliberately NOT reset; the prompt is
    /// once per session, not once per filter change.
    pub fn replace_listings(&mut self, listings: Vec<Listing>) {
        if let Some(handle) = self.cooldown_handle.take() {
            handle.abort();
        }

        let clips = listings
            .iter()
            .map(|l| {
                ClipPlayback::new(
                    Duration::from_secs(l.clip_seconds),
                    l.video_url.is_some(),
                )
            })
            .collect();

        self.listings = Arc::new(listings);
        self.deck = PlaybackDeck::new(clips);
        self.controller.replace_items(self.listings.len());
        self.wheel.reset();
        self.swipe.cancel();

        if !self.listings.is_empty() {
            self.deck.activate(0);
        }
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Per-listing actions
    // ------------------------------------------------------------------

    /// Toggle the like flag on the active listing.
    pub fn toggle_like(&mut self) {
        let Some(id) = self.current_listing().map(|l| l.id.clone()) else {
            return;
        };
        if !self.liked.insert(id.clone()) {
            self.liked.remove(&id);
        }
        self.needs_redraw = true;
    }

    /// Toggle the save flag on the active listing.
    pub fn toggle_save(&mut self) {
        let Some(listing) = self.current_listing() else {
            return;
        };
        let id = listing.id.clone();
        let saved = if self.saved.insert(id.clone()) {
            true
        } else {
            self.saved.remove(&id);
            false
        };
        self.set_status(if saved { "Saved" } else { "Removed from saved" });
        self.needs_redraw = true;
    }

    /// Toggle following the active listing's broker.
    ///
    /// Following a broker always opens the download prompt, independent of
    /// the scroll-depth latch.
    pub fn toggle_follow(&mut self) {
        let Some(name) = self.current_listing().map(|l| l.broker.name.clone()) else {
            return;
        };
        if self.followed.insert(name.clone()) {
            tracing::info!(broker = %name, "Followed broker");
            self.overlay = Some(Overlay::DownloadPrompt);
        } else {
            self.followed.remove(&name);
        }
        self.needs_redraw = true;
    }

    /// Toggle mute on the active clip.
    pub fn toggle_mute(&mut self) {
        if let Some(clip) = self.deck.active_clip_mut() {
            clip.toggle_mute();
            self.needs_redraw = true;
        }
    }

    /// Display count for the like rail: base count plus the local toggle.
    pub fn like_count(&self, listing: &Listing) -> u64 {
        listing.likes + u64::from(self.liked.contains(&listing.id))
    }

    pub fn is_liked(&self, listing: &Listing) -> bool {
        self.liked.contains(&listing.id)
    }

    pub fn is_saved(&self, listing: &Listing) -> bool {
        listing.saved || self.saved.contains(&listing.id)
    }

    pub fn is_following(&self, listing: &Listing) -> bool {
        self.followed.contains(&listing.broker.name)
    }

    // ------------------------------------------------------------------
    // Overlays and theme
    // ------------------------------------------------------------------

    /// Keybinding dispatch context for the current UI state.
    pub fn input_context(&self) -> Context {
        if self.overlay.is_some() {
            Context::Overlay
        } else {
            Context::Feed
        }
    }

    /// Close the open overlay. Playback is unaffected; the clip keeps
    /// running behind modals.
    pub fn close_overlay(&mut self) {
        self.overlay = None;
        self.needs_redraw = true;
    }

    /// Open the filter panel seeded from the applied criteria.
    pub fn open_filters(&mut self) {
        self.overlay = Some(Overlay::Filters(FilterDraft::from_criteria(&self.filters)));
        self.needs_redraw = true;
    }

    /// Apply the filter draft and refetch.
    pub fn apply_filters(&mut self, draft: &FilterDraft, tx: &mpsc::UnboundedSender<AppEvent>) {
        self.filters = draft.to_criteria();
        self.overlay = None;
        self.spawn_fetch(tx);
    }

    /// Drop all filters and refetch.
    pub fn clear_filters(&mut self, tx: &mpsc::UnboundedSender<AppEvent>) {
        if self.filters.is_empty() {
            self.set_status("No filters active");
            return;
        }
        self.filters = FilterCriteria::default();
        self.set_status("Filters cleared");
        self.spawn_fetch(tx);
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.palette = variant.palette();
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns the new name for status
    /// display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------
    // Status line
    // ------------------------------------------------------------------

    /// Set status message (auto-expires after 3 seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired (older than 3 seconds).
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Advance clip playback by one tick interval.
    pub fn tick_playback(&mut self, dt: Duration) {
        if self.deck.playing_count() > 0 {
            self.deck.tick(dt);
            self.needs_redraw = true;
        }
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

/// Abort all in-flight async tasks on App drop so nothing outlives the
/// event loop.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted fetch task on App drop");
        }
        if let Some(handle) = self.cooldown_handle.take() {
            handle.abort();
            tracing::debug!("Aborted cool-down timer on App drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::sample_listing;
    use futures::future::FutureExt;
    use futures::future::BoxFuture;
    use tokio::time::{self, Duration};

    struct StaticProvider(Vec<Listing>);

    impl ListingProvider for StaticProvider {
        fn fetch(
            &self,
            filter: FilterCriteria,
        ) -> BoxFuture<'_, Result<Vec<Listing>, ProviderError>> {
            let items: Vec<Listing> = self
                .0
                .iter()
                .filter(|l| filter.matches(l))
                .cloned()
                .collect();
            async move { Ok(items) }.boxed()
        }
    }

    fn listings(n: usize) -> Vec<Listing> {
        (0..n)
            .map(|i| sample_listing(&format!("l{}", i), "Dubai", 4000, ListingKind::Apartment))
            .collect()
    }

    fn test_app() -> App {
        let provider = Arc::new(StaticProvider(listings(6)));
        App::new(provider, &Config::default())
    }

    #[tokio::test]
    async fn test_empty_app_has_no_active_listing() {
        let app = test_app();
        assert!(app.current_listing().is_none());
        assert_eq!(app.controller.item_count(), 0);
    }

    #[tokio::test]
    async fn test_replace_listings_activates_first() {
        let mut app = test_app();
        app.replace_listings(listings(3));
        assert_eq!(app.controller.active_index(), Some(0));
        assert_eq!(app.deck.active_index(), Some(0));
        assert_eq!(app.deck.playing_count(), 1);
    }

    #[tokio::test]
    async fn test_navigate_moves_playback_with_index() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.replace_listings(listings(3));

        app.navigate(NavigationIntent::Next, &tx);

        assert_eq!(app.controller.active_index(), Some(1));
        assert_eq!(app.deck.active_index(), Some(1));
        assert_eq!(app.deck.playing_count(), 1);
    }

    #[tokio::test]
    async fn test_navigate_blocked_during_cooldown() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.replace_listings(listings(5));

        app.navigate(NavigationIntent::Next, &tx);
        app.navigate(NavigationIntent::Next, &tx); // Dropped mid-transition

        assert_eq!(app.controller.active_index(), Some(1));
    }

    #[tokio::test]
    async fn test_cooldown_event_reopens_navigation() {
        time::pause();
        let mut app = test_app();
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.replace_listings(listings(5));

        app.navigate(NavigationIntent::Next, &tx);
        assert!(app.controller.is_transitioning());

        time::advance(Duration::from_millis(501)).await;
        match rx.recv().await {
            Some(AppEvent::NavCooldownElapsed { generation }) => {
                app.on_cooldown_elapsed(generation);
            }
            _ => panic!("expected cool-down event"),
        }

        assert!(!app.controller.is_transitioning());
        app.navigate(NavigationIntent::Next, &tx);
        assert_eq!(app.controller.active_index(), Some(2));
    }

    #[tokio::test]
    async fn test_stale_cooldown_generation_ignored() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.replace_listings(listings(5));

        app.navigate(NavigationIntent::Next, &tx);
        let stale = app.controller.generation();
        app.on_cooldown_elapsed(stale);
        app.navigate(NavigationIntent::Next, &tx);

        // A timer from before the second step must not end its transition
        app.on_cooldown_elapsed(stale);
        assert!(app.controller.is_transitioning());
    }

    #[tokio::test]
    async fn test_prompt_opens_once_at_depth() {
        time::pause();
        let mut app = test_app();
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.replace_listings(listings(10));

        for expected in 1..=5 {
            app.navigate(NavigationIntent::Next, &tx);
            assert_eq!(app.controller.active_index(), Some(expected));
            if expected >= 4 {
                break;
            }
            time::advance(Duration::from_millis(501)).await;
            if let Some(AppEvent::NavCooldownElapsed { generation }) = rx.recv().await {
                app.on_cooldown_elapsed(generation);
            }
        }

        assert!(matches!(app.overlay, Some(Overlay::DownloadPrompt)));
        assert!(app.controller.has_shown_prompt());
    }

    #[tokio::test]
    async fn test_follow_opens_prompt_without_latch() {
        let mut app = test_app();
        app.replace_listings(listings(3));
        assert!(!app.controller.has_shown_prompt());

        app.toggle_follow();

        assert!(matches!(app.overlay, Some(Overlay::DownloadPrompt)));
        assert!(app.is_following(&app.listings[0].clone()));
    }

    #[tokio::test]
    async fn test_like_toggle_adjusts_count() {
        let mut app = test_app();
        app.replace_listings(listings(1));
        let base = app.listings[0].likes;

        app.toggle_like();
        assert_eq!(app.like_count(&app.listings[0]), base + 1);
        app.toggle_like();
        assert_eq!(app.like_count(&app.listings[0]), base);
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_feed() {
        let mut app = test_app();
        app.replace_listings(listings(3));
        app.fetch_generation = 7;

        app.on_listings_loaded(
            7,
            Err(ProviderError::BadStatus { status: 500 }),
        );

        assert_eq!(app.controller.item_count(), 0);
        assert!(app.current_listing().is_none());
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_stale_fetch_result_discarded() {
        let mut app = test_app();
        app.fetch_generation = 3;

        app.on_listings_loaded(2, Ok(listings(4)));

        assert_eq!(app.controller.item_count(), 0);
    }

    #[tokio::test]
    async fn test_prompt_latch_survives_reload() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.replace_listings(listings(10));

        // Force the latch via GoTo past the threshold
        app.navigate(NavigationIntent::GoTo(5), &tx);
        assert!(app.controller.has_shown_prompt());
        app.close_overlay();

        app.replace_listings(listings(10));
        assert!(app.controller.has_shown_prompt());
        app.navigate(NavigationIntent::GoTo(6), &tx);
        assert!(app.overlay.is_none());
    }

    #[tokio::test]
    async fn test_filter_draft_round_trip() {
        let criteria = FilterCriteria {
            city: Some("Dubai".to_string()),
            price: crate::listings::PriceRange {
                min: Some(3000),
                max: Some(8000),
            },
            kind: Some(ListingKind::Studio),
        };
        let draft = FilterDraft::from_criteria(&criteria);
        assert_eq!(draft.to_criteria(), criteria);
    }

    #[tokio::test]
    async fn test_filter_draft_blank_prices_unbounded() {
        let mut draft = FilterDraft::from_criteria(&FilterCriteria::default());
        draft.city = "  ".to_string();
        draft.max_price = "cheap".to_string();
        let criteria = draft.to_criteria();
        assert!(criteria.is_empty());
    }

    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        time::pause();
        let mut app = test_app();
        app.set_status("Saved");
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_overlay_does_not_pause_playback() {
        let mut app = test_app();
        app.replace_listings(listings(3));
        assert_eq!(app.deck.playing_count(), 1);

        app.open_filters();
        assert_eq!(app.deck.playing_count(), 1);
        app.close_overlay();
        assert_eq!(app.deck.playing_count(), 1);
    }

    #[tokio::test]
    async fn test_overlay_context_switches_dispatch() {
        let mut app = test_app();
        assert_eq!(app.input_context(), Context::Feed);
        app.open_filters();
        assert_eq!(app.input_context(), Context::Overlay);
        app.close_overlay();
        assert_eq!(app.input_context(), Context::Feed);
    }
}
