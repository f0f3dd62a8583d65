//! Pagination of a chapter's blocks into page containers.
//!
//! Chapters in the default layout become a single flowing page. Paged ("A4")
//! chapters are packed greedily: each block is tentatively appended to the
//! open page and the page is measured; when it overflows the page budget the
//! block moves to a fresh page instead. Blocks are never split, so a single
//! oversized block (a large figure, a long table) overflows its own page.

use crate::content::ContentNode;
use crate::manifest::{ChapterSpec, LayoutMode};
use tracing::debug;

/// Slack absorbed before a page counts as overflowing (sub-pixel rounding).
pub const OVERFLOW_TOLERANCE: f32 = 1.0;

/// Measures the rendered height of a run of blocks laid out in one container.
pub trait Measure {
    fn measure(&self, nodes: &[ContentNode]) -> f32;
}

/// Content budget of a page container, queried each time a page is opened.
pub trait PageGeometry {
    fn content_budget(&self, page_index: usize) -> f32;
}

/// Every page gets the same budget.
impl PageGeometry for f32 {
    fn content_budget(&self, _page_index: usize) -> f32 {
        *self
    }
}

/// Budget computed per page, e.g. from a container that can be resized
/// between page creations.
pub struct PerPageBudget<F>(pub F);

impl<F: Fn(usize) -> f32> PageGeometry for PerPageBudget<F> {
    fn content_budget(&self, page_index: usize) -> f32 {
        (self.0)(page_index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub chapter_id: String,
    /// 1-based.
    pub page_index: usize,
    pub layout: LayoutMode,
    pub nodes: Vec<ContentNode>,
    pub is_first_page: bool,
    pub has_force_break_before: bool,
    pub has_break_after_marker: bool,
}

impl Page {
    fn first(chapter: &ChapterSpec, layout: LayoutMode, nodes: Vec<ContentNode>) -> Self {
        Page {
            chapter_id: chapter.id.clone(),
            page_index: 1,
            layout,
            nodes,
            is_first_page: true,
            has_force_break_before: chapter.force_page_break_before,
            has_break_after_marker: false,
        }
    }

    fn continuation(chapter: &ChapterSpec, page_index: usize) -> Self {
        Page {
            chapter_id: chapter.id.clone(),
            page_index,
            layout: LayoutMode::Paged,
            nodes: Vec::new(),
            is_first_page: false,
            has_force_break_before: false,
            has_break_after_marker: false,
        }
    }

    pub fn anchor_id(&self) -> String {
        anchor_id(&self.chapter_id, self.page_index)
    }
}

/// Stable element id of a page. The first page reuses the chapter-level id
/// so deep links to a chapter land on its first page.
pub fn anchor_id(chapter_id: &str, page_index: usize) -> String {
    if page_index <= 1 {
        format!("chapter-{chapter_id}")
    } else {
        format!("chapter-{chapter_id}-{page_index}")
    }
}

/// Split one chapter's blocks into pages. Never fails: degenerate budgets
/// fall back to one block per page.
pub fn paginate<M, G>(
    chapter: &ChapterSpec,
    nodes: Vec<ContentNode>,
    measure: &M,
    geometry: &G,
) -> Vec<Page>
where
    M: Measure + ?Sized,
    G: PageGeometry + ?Sized,
{
    if chapter.layout != LayoutMode::Paged {
        let mut page = Page::first(chapter, LayoutMode::Default, nodes);
        page.has_break_after_marker = chapter.page_break_after;
        return vec![page];
    }

    let mut pages = Vec::new();
    let mut current = Page::first(chapter, LayoutMode::Paged, Vec::new());
    let mut budget = geometry.content_budget(current.page_index);

    for node in nodes {
        let had_content = !current.nodes.is_empty();
        current.nodes.push(node);
        if !had_content {
            continue;
        }
        let height = measure.measure(&current.nodes);
        if !overflows(height, budget) {
            continue;
        }
        if let Some(moved) = current.nodes.pop() {
            let next_index = current.page_index + 1;
            pages.push(std::mem::replace(
                &mut current,
                Page::continuation(chapter, next_index),
            ));
            budget = geometry.content_budget(next_index);
            current.nodes.push(moved);
        }
    }

    current.has_break_after_marker = chapter.page_break_after;
    pages.push(current);
    debug!(chapter = %chapter.id, pages = pages.len(), "Paginated chapter");
    pages
}

fn overflows(height: f32, budget: f32) -> bool {
    if budget.is_nan() || budget <= 0.0 {
        return true;
    }
    height > budget + OVERFLOW_TOLERANCE
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::BlockKind;
    use proptest::prelude::*;
    use std::cell::Cell;

    /// Heights indexed by node ordinal; a page measures as their sum.
    pub(crate) struct SyntheticHeights(pub Vec<f32>);

    impl Measure for SyntheticHeights {
        fn measure(&self, nodes: &[ContentNode]) -> f32 {
            nodes
                .iter()
                .map(|n| self.0.get(n.ordinal).copied().unwrap_or(0.0))
                .sum()
        }
    }

    pub(crate) fn nodes(count: usize) -> Vec<ContentNode> {
        (0..count)
            .map(|ordinal| ContentNode {
                ordinal,
                kind: BlockKind::Paragraph,
                html: format!("<p>n{}</p>", ordinal + 1),
                text: format!("n{}", ordinal + 1),
            })
            .collect()
    }

    fn paged(id: &str) -> ChapterSpec {
        let mut spec = ChapterSpec::new(id, format!("{id}.md"));
        spec.layout = LayoutMode::Paged;
        spec
    }

    fn ordinals(pages: &[Page]) -> Vec<Vec<usize>> {
        pages
            .iter()
            .map(|p| p.nodes.iter().map(|n| n.ordinal).collect())
            .collect()
    }

    #[test]
    fn packs_forty_pixel_blocks_two_per_page() {
        let heights = SyntheticHeights(vec![40.0; 5]);
        let pages = paginate(&paged("1.1"), nodes(5), &heights, &100.0_f32);

        assert_eq!(ordinals(&pages), vec![vec![0, 1], vec![2, 3], vec![4]]);
        let page_heights: Vec<f32> = pages.iter().map(|p| heights.measure(&p.nodes)).collect();
        assert_eq!(page_heights, vec![80.0, 80.0, 40.0]);
        let indices: Vec<usize> = pages.iter().map(|p| p.page_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn oversized_block_overflows_instead_of_splitting() {
        let pages = paginate(&paged("2.0"), nodes(1), &SyntheticHeights(vec![500.0]), &100.0_f32);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].nodes.len(), 1);
    }

    #[test]
    fn oversized_block_in_the_middle_gets_its_own_page() {
        let heights = SyntheticHeights(vec![30.0, 500.0, 30.0]);
        let pages = paginate(&paged("2.0"), nodes(3), &heights, &100.0_f32);
        assert_eq!(ordinals(&pages), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn tolerance_absorbs_subpixel_overflow() {
        let heights = SyntheticHeights(vec![50.0, 50.5]);
        let pages = paginate(&paged("1.0"), nodes(2), &heights, &100.0_f32);
        assert_eq!(pages.len(), 1);

        let heights = SyntheticHeights(vec![50.0, 51.5]);
        let pages = paginate(&paged("1.0"), nodes(2), &heights, &100.0_f32);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn default_layout_is_one_page_without_measuring() {
        struct Panics;
        impl Measure for Panics {
            fn measure(&self, _: &[ContentNode]) -> f32 {
                panic!("default layout must not measure");
            }
        }

        let mut spec = ChapterSpec::new("3.0", "3.0.md");
        spec.force_page_break_before = true;
        spec.page_break_after = true;
        let pages = paginate(&spec, nodes(12), &Panics, &10.0_f32);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].nodes.len(), 12);
        assert_eq!(pages[0].layout, LayoutMode::Default);
        assert!(pages[0].has_force_break_before);
        assert!(pages[0].has_break_after_marker);
    }

    #[test]
    fn empty_chapter_still_gets_an_anchor_page() {
        let pages = paginate(&paged("4.0"), Vec::new(), &SyntheticHeights(vec![]), &100.0_f32);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].nodes.is_empty());
        assert_eq!(pages[0].anchor_id(), "chapter-4.0");
    }

    #[test]
    fn non_positive_budget_puts_each_block_on_its_own_page() {
        let heights = SyntheticHeights(vec![1.0; 4]);
        for budget in [0.0f32, -20.0, f32::NAN] {
            let pages = paginate(&paged("5.0"), nodes(4), &heights, &budget);
            assert_eq!(ordinals(&pages), vec![vec![0], vec![1], vec![2], vec![3]]);
        }
    }

    #[test]
    fn break_markers_sit_on_first_and_last_pages() {
        let mut spec = paged("6.1");
        spec.force_page_break_before = true;
        spec.page_break_after = true;
        let pages = paginate(&spec, nodes(5), &SyntheticHeights(vec![40.0; 5]), &100.0_f32);

        assert!(pages[0].is_first_page && pages[0].has_force_break_before);
        assert!(pages[1..].iter().all(|p| !p.is_first_page && !p.has_force_break_before));
        assert!(pages[2].has_break_after_marker);
        assert!(pages[..2].iter().all(|p| !p.has_break_after_marker));
        assert!(pages.iter().all(|p| p.layout == LayoutMode::Paged));
    }

    #[test]
    fn budget_is_queried_per_page_not_cached() {
        let queried = Cell::new(Vec::<usize>::new());
        let geometry = PerPageBudget(|page_index: usize| -> f32 {
            let mut seen = queried.take();
            seen.push(page_index);
            queried.set(seen);
            if page_index == 1 { 100.0 } else { 200.0 }
        });
        let pages = paginate(&paged("7.0"), nodes(7), &SyntheticHeights(vec![40.0; 7]), &geometry);

        assert_eq!(ordinals(&pages), vec![vec![0, 1], vec![2, 3, 4, 5, 6]]);
        assert_eq!(queried.take(), vec![1, 2]);
    }

    #[test]
    fn anchors_follow_chapter_and_page_index() {
        assert_eq!(anchor_id("3.2", 1), "chapter-3.2");
        assert_eq!(anchor_id("3.2", 4), "chapter-3.2-4");
    }

    proptest! {
        #[test]
        fn prop_pages_reassemble_the_chapter(
            heights in prop::collection::vec(0.0f32..300.0, 0..40),
            budget in -50.0f32..400.0,
        ) {
            let count = heights.len();
            let measure = SyntheticHeights(heights);
            let pages = paginate(&paged("9.9"), nodes(count), &measure, &budget);

            let flat: Vec<usize> = pages.iter().flat_map(|p| p.nodes.iter().map(|n| n.ordinal)).collect();
            prop_assert_eq!(flat, (0..count).collect::<Vec<_>>());

            let first_pages = pages.iter().filter(|p| p.page_index == 1).count();
            prop_assert_eq!(first_pages, 1);
            prop_assert!(pages[0].is_first_page);
            prop_assert_eq!(pages[0].anchor_id(), "chapter-9.9");
            for (position, page) in pages.iter().enumerate() {
                prop_assert_eq!(page.page_index, position + 1);
                if count > 0 {
                    prop_assert!(!page.nodes.is_empty());
                }
            }
        }

        #[test]
        fn prop_pagination_is_deterministic(
            heights in prop::collection::vec(1.0f32..200.0, 1..30),
            budget in 1.0f32..400.0,
        ) {
            let count = heights.len();
            let measure = SyntheticHeights(heights);
            let first = paginate(&paged("8.0"), nodes(count), &measure, &budget);
            let second = paginate(&paged("8.0"), nodes(count), &measure, &budget);
            prop_assert_eq!(ordinals(&first), ordinals(&second));
        }

        #[test]
        fn prop_multi_block_pages_fit_their_budget(
            heights in prop::collection::vec(1.0f32..150.0, 1..30),
            budget in 50.0f32..400.0,
        ) {
            let count = heights.len();
            let measure = SyntheticHeights(heights);
            let pages = paginate(&paged("8.1"), nodes(count), &measure, &budget);
            for page in pages.iter().filter(|p| p.nodes.len() > 1) {
                prop_assert!(measure.measure(&page.nodes) <= budget + OVERFLOW_TOLERANCE);
            }
        }
    }
}
