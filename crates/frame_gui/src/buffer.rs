//! Sliding-window page rendering
//!
//! With a buffer configured, a session renders only the pages around the one
//! being viewed. Positions here are indices into the ascending list of
//! non-global page ids, not page ids.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Window parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferSettings {
    /// Pages rendered per batch
    pub render_limit: usize,
    /// Distance from the rendered edge that triggers the next batch
    pub margin: usize,
    /// Pages farther than this from the viewed one are evicted; negative
    /// disables eviction
    pub cleanup_margin: i32,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            render_limit: 10,
            margin: 3,
            cleanup_margin: 15,
        }
    }
}

/// What to render and evict for one page request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferPlan {
    /// Indices to render, ascending
    pub render: Vec<usize>,
    /// Rendered indices to drop, ascending
    pub evict: Vec<usize>,
}

impl BufferSettings {
    pub fn with_render_limit(mut self, render_limit: usize) -> Self {
        self.render_limit = render_limit;
        self
    }

    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_cleanup_margin(mut self, cleanup_margin: i32) -> Self {
        self.cleanup_margin = cleanup_margin;
        self
    }

    /// Indices to render when a session starts on `initial`
    pub fn initial(&self, initial: usize, page_count: usize) -> Vec<usize> {
        if page_count == 0 || initial >= page_count {
            return Vec::new();
        }
        let start = initial.saturating_sub(self.render_limit);
        let end = (initial + self.render_limit).min(page_count - 1);
        (start..=end).collect()
    }

    /// Plan the window after the viewer asked for index `requested`.
    ///
    /// `rendered` holds the indices that currently have a non-empty
    /// inventory. Pages that would be evicted right away are not rendered.
    pub fn plan(&self, requested: usize, page_count: usize, rendered: &BTreeSet<usize>) -> BufferPlan {
        if requested >= page_count {
            return BufferPlan::default();
        }
        let last = page_count - 1;
        let mut render = BTreeSet::new();

        let frontier = rendered.iter().next_back().copied().unwrap_or(requested);
        if requested + self.margin >= frontier && frontier < last {
            let end = (frontier + self.render_limit).min(last);
            render.extend(frontier + 1..=end);
        }

        let floor = rendered.iter().next().copied().unwrap_or(requested);
        if requested.saturating_sub(self.margin) <= floor && floor > 0 {
            let start = floor.saturating_sub(self.render_limit);
            render.extend(start..floor);
        }

        render.retain(|index| !rendered.contains(index));

        let mut evict = Vec::new();
        if self.cleanup_margin >= 0 {
            let keep = self.cleanup_margin as usize;
            let outside = |index: usize| index.abs_diff(requested) > keep;
            evict = rendered.iter().copied().filter(|&i| outside(i)).collect();
            render.retain(|&index| !outside(index));
        }

        BufferPlan {
            render: render.into_iter().collect(),
            evict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(range: std::ops::RangeInclusive<usize>) -> BTreeSet<usize> {
        range.collect()
    }

    #[test]
    fn test_defaults() {
        let settings = BufferSettings::default();
        assert_eq!((settings.render_limit, settings.margin, settings.cleanup_margin), (10, 3, 15));
    }

    #[test]
    fn test_near_frontier_loads_next_batch() {
        let plan = BufferSettings::default().plan(7, 40, &rendered(0..=9));
        assert_eq!(plan.render, (10..=19).collect::<Vec<_>>());
        assert!(plan.evict.is_empty());
    }

    #[test]
    fn test_far_from_frontier_loads_nothing() {
        let plan = BufferSettings::default().plan(2, 40, &rendered(0..=9));
        assert!(plan.render.is_empty());
    }

    #[test]
    fn test_batch_capped_at_last_page() {
        let plan = BufferSettings::default().plan(8, 14, &rendered(0..=9));
        assert_eq!(plan.render, vec![10, 11, 12, 13]);
    }

    #[test]
    fn test_backward_batch() {
        let plan = BufferSettings::default()
            .with_cleanup_margin(-1)
            .plan(21, 40, &rendered(20..=29));
        assert_eq!(plan.render, (10..=19).collect::<Vec<_>>());
    }

    #[test]
    fn test_cleanup_evicts_far_pages() {
        let settings = BufferSettings::default().with_cleanup_margin(5);
        let plan = settings.plan(20, 40, &rendered(10..=25));
        assert_eq!(plan.evict, (10..=14).collect::<Vec<_>>());
        assert!(plan.render.is_empty());
        // forward batch is 26..=35, only the close ones survive
        let plan = settings.plan(24, 40, &rendered(15..=25));
        assert_eq!(plan.render, vec![26, 27, 28, 29]);
        assert_eq!(plan.evict, vec![15, 16, 17, 18]);
    }

    #[test]
    fn test_negative_cleanup_keeps_everything() {
        let plan = BufferSettings::default()
            .with_cleanup_margin(-1)
            .plan(39, 40, &rendered(0..=39));
        assert!(plan.evict.is_empty());
        assert!(plan.render.is_empty());
    }

    #[test]
    fn test_initial_window() {
        let settings = BufferSettings::default();
        assert_eq!(settings.initial(0, 40), (0..=10).collect::<Vec<_>>());
        assert_eq!(settings.initial(15, 40), (5..=25).collect::<Vec<_>>());
        assert_eq!(settings.initial(3, 5), vec![0, 1, 2, 3, 4]);
        assert!(settings.initial(7, 5).is_empty());
    }

    #[test]
    fn test_unknown_index_plans_nothing() {
        assert_eq!(BufferSettings::default().plan(50, 40, &rendered(0..=9)), BufferPlan::default());
    }
}
