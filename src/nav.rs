//! Pure navigation logic: the path taxonomy and the visible-article
//! selection.
//!
//! Everything here is a function of `(articles, path)` with no UI coupling,
//! so the filtering behavior is testable without a terminal. The navbar
//! renderer consumes [`nav_tree`]; the grid renderer consumes
//! [`select_visible`].

use crate::manifest::Article;
use std::collections::HashSet;

/// Distinct top-level categories, in manifest order.
///
/// A category is the first non-empty path segment of an article. Articles
/// with an empty path contribute nothing.
pub fn categories(articles: &[Article]) -> Vec<String> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .filter_map(|a| a.category())
        .filter(|c| seen.insert(c.to_string()))
        .map(str::to_string)
        .collect()
}

/// Distinct subcategories of `category`, in manifest order.
///
/// Matching uses a raw string prefix on the full path, mirroring the
/// category filter of [`select_visible`]. Empty second segments (a path with
/// a trailing slash) are skipped.
pub fn subcategories(articles: &[Article], category: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .filter(|a| a.relative_path.starts_with(category))
        .filter_map(|a| a.subcategory())
        .filter(|s| seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}

/// Indices of the articles visible under `path`, in manifest order.
///
/// An empty path selects every article; otherwise an article is visible when
/// its `relative_path` starts with `path`.
pub fn select_visible(articles: &[Article], path: &str) -> Vec<usize> {
    articles
        .iter()
        .enumerate()
        .filter(|(_, a)| path.is_empty() || a.relative_path.starts_with(path))
        .map(|(i, _)| i)
        .collect()
}

/// One entry in the flattened navbar tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Path pushed when this entry is selected. Empty for "All".
    pub path: String,
    /// Display label (the path segment, or "All").
    pub label: String,
    /// 0 for "All" and categories, 1 for subcategory entries.
    pub depth: usize,
    /// Whether this entry has subcategory children.
    pub has_children: bool,
    /// Number of articles visible under this entry's path.
    pub article_count: usize,
}

/// Build the flattened navbar tree.
///
/// The tree always starts with "All" (empty path) followed by every
/// category. The category named by `expanded` additionally gets its
/// subcategory entries inlined beneath it: the submenu that appears while
/// the cursor rests on a category and disappears when it leaves.
pub fn nav_tree(articles: &[Article], expanded: Option<&str>) -> Vec<NavItem> {
    let mut items = vec![NavItem {
        path: String::new(),
        label: "All".to_string(),
        depth: 0,
        has_children: false,
        article_count: articles.len(),
    }];

    for category in categories(articles) {
        let subs = subcategories(articles, &category);
        items.push(NavItem {
            path: category.clone(),
            label: category.clone(),
            depth: 0,
            has_children: !subs.is_empty(),
            article_count: select_visible(articles, &category).len(),
        });

        if expanded == Some(category.as_str()) {
            for sub in subs {
                let path = format!("{}/{}", category, sub);
                let article_count = select_visible(articles, &path).len();
                items.push(NavItem {
                    path,
                    label: sub,
                    depth: 1,
                    has_children: false,
                    article_count,
                });
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article(path: &str, title: &str) -> Article {
        Article {
            relative_path: path.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// The two-article manifest worked through in the design discussion.
    fn sample() -> Vec<Article> {
        vec![article("blog/2023/a", "A"), article("notes/b", "B")]
    }

    #[test]
    fn test_categories_distinct_in_manifest_order() {
        let articles = vec![
            article("blog/x", "1"),
            article("notes/y", "2"),
            article("blog/z", "3"),
            article("", "untitled"),
        ];
        assert_eq!(categories(&articles), vec!["blog", "notes"]);
    }

    #[test]
    fn test_categories_exclude_empty_paths() {
        let articles = vec![article("", "a"), article("", "b")];
        assert!(categories(&articles).is_empty());
    }

    #[test]
    fn test_subcategories_under_category() {
        let articles = vec![
            article("blog/2023/a", "1"),
            article("blog/2022/b", "2"),
            article("blog/2023/c", "3"),
            article("notes/misc/d", "4"),
        ];
        assert_eq!(subcategories(&articles, "blog"), vec!["2023", "2022"]);
        assert_eq!(subcategories(&articles, "notes"), vec!["misc"]);
    }

    #[test]
    fn test_subcategories_skip_bare_and_trailing_paths() {
        let articles = vec![article("blog", "1"), article("blog/", "2")];
        assert!(subcategories(&articles, "blog").is_empty());
    }

    #[test]
    fn test_select_visible_empty_path_selects_all() {
        let articles = sample();
        assert_eq!(select_visible(&articles, ""), vec![0, 1]);
    }

    #[test]
    fn test_select_visible_filters_by_prefix() {
        let articles = sample();
        assert_eq!(select_visible(&articles, "notes"), vec![1]);
        assert_eq!(select_visible(&articles, "blog/2023"), vec![0]);
        assert_eq!(select_visible(&articles, "missing"), Vec::<usize>::new());
    }

    #[test]
    fn test_select_visible_preserves_manifest_order() {
        let articles = vec![
            article("blog/c", "1"),
            article("notes/x", "2"),
            article("blog/a", "3"),
        ];
        // No sorting: order follows the manifest, not the labels
        assert_eq!(select_visible(&articles, "blog"), vec![0, 2]);
    }

    #[test]
    fn test_sample_manifest_end_to_end() {
        let articles = sample();
        assert_eq!(categories(&articles), vec!["blog", "notes"]);
        assert_eq!(subcategories(&articles, "blog"), vec!["2023"]);
        assert_eq!(select_visible(&articles, "").len(), 2);
        assert_eq!(select_visible(&articles, "notes"), vec![1]);
    }

    #[test]
    fn test_nav_tree_collapsed() {
        let articles = sample();
        let tree = nav_tree(&articles, None);
        let labels: Vec<&str> = tree.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["All", "blog", "notes"]);
        assert_eq!(tree[0].path, "");
        assert_eq!(tree[0].article_count, 2);
        assert!(tree[1].has_children);
        assert!(!tree[2].has_children);
    }

    #[test]
    fn test_nav_tree_expands_one_category() {
        let articles = sample();
        let tree = nav_tree(&articles, Some("blog"));
        let labels: Vec<&str> = tree.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["All", "blog", "2023", "notes"]);

        let sub = &tree[2];
        assert_eq!(sub.path, "blog/2023");
        assert_eq!(sub.depth, 1);
        assert_eq!(sub.article_count, 1);
    }

    #[test]
    fn test_nav_tree_expanding_other_category_collapses() {
        let articles = sample();
        let tree = nav_tree(&articles, Some("notes"));
        let labels: Vec<&str> = tree.iter().map(|i| i.label.as_str()).collect();
        // blog's submenu is gone; notes exposes its second segment "b"
        assert_eq!(labels, vec!["All", "blog", "notes", "b"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_path() -> impl Strategy<Value = String> {
            // Up to three short lowercase segments, possibly empty
            proptest::collection::vec("[a-c]{0,2}", 0..=3).prop_map(|segs| segs.join("/"))
        }

        fn arb_articles() -> impl Strategy<Value = Vec<Article>> {
            proptest::collection::vec(arb_path(), 0..12).prop_map(|paths| {
                paths
                    .into_iter()
                    .map(|p| Article {
                        relative_path: p,
                        ..Default::default()
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn categories_are_distinct_nonempty_first_segments(articles in arb_articles()) {
                let cats = categories(&articles);

                let mut expected: Vec<String> = Vec::new();
                for a in &articles {
                    if let Some(c) = a.category() {
                        if !expected.iter().any(|e| e == c) {
                            expected.push(c.to_string());
                        }
                    }
                }
                prop_assert_eq!(cats, expected);
            }

            #[test]
            fn visible_set_is_exactly_the_prefix_matches(
                articles in arb_articles(),
                path in arb_path(),
            ) {
                let visible = select_visible(&articles, &path);
                for (i, a) in articles.iter().enumerate() {
                    let matches = path.is_empty() || a.relative_path.starts_with(&path);
                    prop_assert_eq!(visible.contains(&i), matches);
                }
                // Manifest order: indices strictly increasing
                prop_assert!(visible.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
