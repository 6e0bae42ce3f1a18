use garden_core::{FeedDocument, FeedEntry, Post, SiteMetadata};

/// Non-draft posts, newest first.
///
/// The sort is stable, so posts sharing a date keep their input order.
pub fn published(posts: &[Post]) -> Vec<&Post> {
    let mut published: Vec<&Post> = posts.iter().filter(|post| !post.draft).collect();
    published.sort_by(|a, b| b.date.cmp(&a.date));
    published
}

/// Build the feed document for a collection.
///
/// Drops drafts, orders by date descending, and maps each post to an entry
/// linking to `/{collection}/{slug}`. Pure: same input, same output.
pub fn build_feed(posts: &[Post], site: &SiteMetadata) -> FeedDocument {
    let entries = published(posts)
        .into_iter()
        .map(|post| FeedEntry {
            title: post.title.clone(),
            publication_date: post.date,
            link: post.link(),
        })
        .collect();

    FeedDocument {
        site: site.clone(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn site() -> SiteMetadata {
        SiteMetadata {
            title: "Ethan Gardner's Blog".to_string(),
            description: "Ethan's Digital Garden".to_string(),
            site: "https://example.com/".to_string(),
        }
    }

    fn post(title: &str, date: &str, draft: bool, slug: &str) -> Post {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        Post {
            collection: "posts".to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            date,
            draft,
            description: None,
            tags: vec![],
            body: String::new(),
            source: None,
        }
    }

    #[test]
    fn test_drafts_excluded_and_sorted_newest_first() {
        let posts = vec![
            post("A", "2024-01-01", false, "a"),
            post("B", "2024-02-01", true, "b"),
            post("C", "2023-12-01", false, "c"),
        ];

        let doc = build_feed(&posts, &site());
        let got: Vec<(&str, &str)> = doc
            .entries
            .iter()
            .map(|e| (e.title.as_str(), e.link.as_str()))
            .collect();
        assert_eq!(got, vec![("A", "/posts/a"), ("C", "/posts/c")]);
        assert_eq!(doc.entries[0].publication_date, posts[0].date);
    }

    #[test]
    fn test_empty_input_keeps_site_metadata() {
        let doc = build_feed(&[], &site());
        assert!(doc.entries.is_empty());
        assert_eq!(doc.site, site());
    }

    #[test]
    fn test_all_drafts_yields_no_entries() {
        let posts = vec![
            post("A", "2024-01-01", true, "a"),
            post("B", "2024-02-01", true, "b"),
        ];
        assert!(build_feed(&posts, &site()).entries.is_empty());
    }

    #[test]
    fn test_entry_count_matches_non_drafts() {
        let posts: Vec<Post> = (1..=28)
            .map(|day| {
                post(
                    &format!("Post {day}"),
                    &format!("2024-03-{day:02}"),
                    day % 3 == 0,
                    &format!("post-{day}"),
                )
            })
            .collect();
        let expected = posts.iter().filter(|p| !p.draft).count();

        let doc = build_feed(&posts, &site());
        assert_eq!(doc.entries.len(), expected);
        assert!(
            doc.entries
                .windows(2)
                .all(|w| w[0].publication_date >= w[1].publication_date)
        );
    }

    #[test]
    fn test_links_follow_collection_and_slug() {
        let mut note = post("Week 1", "2024-01-07", false, "2024/week-01");
        note.collection = "weekly-notes".to_string();

        let doc = build_feed(&[note], &site());
        assert_eq!(doc.entries[0].link, "/weekly-notes/2024/week-01");
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let posts = vec![
            post("First", "2024-01-01", false, "first"),
            post("Second", "2024-01-01", false, "second"),
            post("Newer", "2024-05-01", false, "newer"),
            post("Third", "2024-01-01", false, "third"),
        ];

        let titles: Vec<String> = build_feed(&posts, &site())
            .entries
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Newer", "First", "Second", "Third"]);
    }

    #[test]
    fn test_idempotent() {
        let posts = vec![
            post("A", "2024-01-01", false, "a"),
            post("C", "2023-12-01", false, "c"),
        ];
        let snapshot = posts.clone();

        let first = build_feed(&posts, &site());
        let second = build_feed(&posts, &site());
        assert_eq!(first, second);
        assert_eq!(posts, snapshot);
    }

    #[test]
    fn test_published_compares_time_of_day() {
        let mut morning = post("Morning", "2024-01-01", false, "morning");
        let mut evening = post("Evening", "2024-01-01", false, "evening");
        morning.date += chrono::Duration::hours(8);
        evening.date += chrono::Duration::hours(20);

        let posts = vec![morning, evening];
        let order: Vec<&str> = published(&posts).iter().map(|p| p.title.as_str()).collect();
        assert_eq!(order, vec!["Evening", "Morning"]);
    }
}
