use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use postshelf::commands::check::{check_site, Problem};
use postshelf::commands::{init, new};
use postshelf::content::{Order, SortKey};
use postshelf::{CollectionError, ContentError, Site};

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn react_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "_config.yml",
        "title: React Notes\nbaseurl: /react-notes\n",
    );
    write(
        dir.path(),
        "_posts/2017-01-14-react-file-structure.md",
        r#"---
layout: post
title: React File Structures
---

How to arrange components, styles and tests.

```jsx
import Header from './Header';
```

![Folder tree]({{ site.baseurl }}/img/tree.png)
"#,
    );
    write(
        dir.path(),
        "_posts/2017-02-03-react-forms.markdown",
        r#"---
layout: post
title: Binding Form Fields in React
---

Controlled inputs keep their value in state.
"#,
    );
    write(dir.path(), "img/tree.png", "png");
    dir
}

#[test]
fn test_load_posts_from_directory() {
    let dir = react_site();
    let site = Site::new(dir.path()).unwrap();
    let posts = site.load_posts().unwrap();

    assert_eq!(posts.len(), 2);
    let post = posts.get_post("2017-01-14-react-file-structure").unwrap();
    assert_eq!(post.title, "React File Structures");
    assert_eq!(post.layout, "post");
    assert_eq!(post.published_date, NaiveDate::from_ymd_opt(2017, 1, 14).unwrap());
    assert!(post.body.starts_with("How to arrange components"));

    let ids: Vec<_> = posts
        .list_sorted(SortKey::Date, Order::Descending)
        .into_iter()
        .map(|(id, _)| id.to_string())
        .collect();
    assert_eq!(
        ids,
        vec!["2017-02-03-react-forms", "2017-01-14-react-file-structure"]
    );
}

#[test]
fn test_missing_posts_dir_is_empty_collection() {
    let dir = TempDir::new().unwrap();
    let site = Site::new(dir.path()).unwrap();
    assert!(site.load_posts().unwrap().is_empty());
}

#[test]
fn test_undated_and_unpublished_posts_are_skipped() {
    let dir = react_site();
    write(dir.path(), "_posts/notes.md", "---\ntitle: No date\n---\n");
    write(
        dir.path(),
        "_posts/2017-03-01-draft.md",
        "---\ntitle: Draft\npublished: false\n---\n",
    );
    write(dir.path(), "_posts/readme.txt", "not a post");

    let site = Site::new(dir.path()).unwrap();
    let posts = site.load_posts().unwrap();
    assert_eq!(posts.len(), 2);
    assert!(!posts.contains("notes"));
    assert!(!posts.contains("2017-03-01-draft"));
}

#[test]
fn test_front_matter_date_overrides_filename() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "_posts/undated-post.md",
        "---\ntitle: Dated in header\ndate: 2016-12-31 09:00:00\n---\nBody\n",
    );
    let site = Site::new(dir.path()).unwrap();
    let posts = site.load_posts().unwrap();
    let post = posts.get_post("undated-post").unwrap();
    assert_eq!(post.published_date, NaiveDate::from_ymd_opt(2016, 12, 31).unwrap());
}

#[test]
fn test_same_stem_different_extension_is_duplicate() {
    let dir = react_site();
    write(
        dir.path(),
        "_posts/2017-02-03-react-forms.md",
        "---\ntitle: Another take\n---\n",
    );
    let site = Site::new(dir.path()).unwrap();

    let err = site.load_posts().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<postshelf::ContentError>(),
        Some(postshelf::ContentError::Collection(
            CollectionError::DuplicateIdentifier(_)
        ))
    ));

    let report = check_site(&site).unwrap();
    assert_eq!(report.posts, 2);
    assert!(matches!(
        report.problems.as_slice(),
        [Problem::Duplicate { id, .. }] if id.as_str() == "2017-02-03-react-forms"
    ));
}

#[test]
fn test_check_reports_missing_image() {
    let dir = react_site();
    write(
        dir.path(),
        "_posts/2017-04-01-hooks.md",
        "---\ntitle: Hooks\n---\n![diagram](/img/hooks.svg)\n\n![remote](https://example.com/x.png)\n",
    );
    let site = Site::new(dir.path()).unwrap();
    let report = check_site(&site).unwrap();

    assert_eq!(report.posts, 3);
    assert_eq!(report.problems.len(), 1);
    match &report.problems[0] {
        Problem::MissingAsset { id, src, expected } => {
            assert_eq!(id.as_str(), "2017-04-01-hooks");
            assert_eq!(src, "/img/hooks.svg");
            assert!(expected.ends_with("img/hooks.svg"));
        }
        other => panic!("unexpected problem: {}", other),
    }
}

#[test]
fn test_clean_site_checks_clean() {
    let dir = react_site();
    let site = Site::new(dir.path()).unwrap();
    assert!(check_site(&site).unwrap().is_clean());
}

#[test]
fn test_new_post_then_load() {
    let dir = react_site();
    let site = Site::new(dir.path()).unwrap();
    let date = NaiveDate::from_ymd_opt(2018, 5, 6).unwrap();

    let path = new::create_post(&site, "Lifting State Up: A Guide", None, Some(date)).unwrap();
    assert!(path.ends_with("_posts/2018-05-06-lifting-state-up-a-guide.md"));

    let posts = site.load_posts().unwrap();
    let post = posts.get_post("2018-05-06-lifting-state-up-a-guide").unwrap();
    assert_eq!(post.title, "Lifting State Up: A Guide");
    assert_eq!(post.layout, "post");
    assert_eq!(post.published_date, date);
}

#[test]
fn test_new_post_refuses_existing_identifier() {
    let dir = react_site();
    let site = Site::new(dir.path()).unwrap();
    let date = NaiveDate::from_ymd_opt(2017, 2, 3).unwrap();

    // an existing .markdown file holds the same identifier
    let err = new::create_post(&site, "React Forms", Some("post"), Some(date)).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(site.load_posts().unwrap().len(), 2);
}

#[test]
fn test_init_site() {
    let dir = TempDir::new().unwrap();
    init::init_site(dir.path()).unwrap();

    let site = Site::new(dir.path()).unwrap();
    assert_eq!(site.config.posts_dir, "_posts");
    let posts = site.load_posts().unwrap();
    assert_eq!(posts.len(), 1);
    let (_, post) = posts.list_posts().next().unwrap();
    assert_eq!(post.title, "Welcome");

    assert!(init::init_site(dir.path()).is_err());
}

#[test]
fn test_new_post_with_undated_file_name_keeps_its_date() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "_config.yml", "new_post_name: \":title.md\"\n");
    let site = Site::new(dir.path()).unwrap();
    let date = NaiveDate::from_ymd_opt(2018, 5, 6).unwrap();

    let path = new::create_post(&site, "Hooks", None, Some(date)).unwrap();
    assert!(path.ends_with("_posts/hooks.md"));

    let posts = site.load_posts().unwrap();
    assert_eq!(posts.len(), 1);
    let post = posts.get_post("hooks").unwrap();
    assert_eq!(post.title, "Hooks");
    assert_eq!(post.published_date, date);
}

#[test]
fn test_broken_front_matter_is_skipped_and_reported() {
    let dir = react_site();
    write(
        dir.path(),
        "_posts/2017-05-01-broken.md",
        "---\ntitle: [unterminated\nlayout: post\n---\nBody\n",
    );
    let site = Site::new(dir.path()).unwrap();

    let posts = site.load_posts().unwrap();
    assert_eq!(posts.len(), 2);
    assert!(!posts.contains("2017-05-01-broken"));

    let report = check_site(&site).unwrap();
    assert_eq!(report.posts, 2);
    assert!(matches!(
        report.problems.as_slice(),
        [Problem::Unloadable {
            error: ContentError::InvalidFrontMatter { .. },
            ..
        }]
    ));
}

#[test]
fn test_undated_post_is_reported() {
    let dir = react_site();
    write(dir.path(), "_posts/notes.md", "---\ntitle: No date\n---\n");
    let site = Site::new(dir.path()).unwrap();

    let report = check_site(&site).unwrap();
    assert_eq!(report.posts, 2);
    match report.problems.as_slice() {
        [Problem::Unloadable {
            path,
            error: ContentError::MissingDate(missing),
        }] => {
            assert!(path.ends_with("_posts/notes.md"));
            assert_eq!(missing, path);
        }
        other => panic!("unexpected problems: {:?}", other),
    }
}

#[test]
fn test_check_counts_match_listing_for_unpublished_posts() {
    let dir = react_site();
    write(
        dir.path(),
        "_posts/2017-03-01-draft.md",
        "---\ntitle: Draft\npublished: false\n---\n![missing](/img/nope.png)\n",
    );
    let site = Site::new(dir.path()).unwrap();

    let report = check_site(&site).unwrap();
    assert_eq!(report.posts, site.load_posts().unwrap().len());
    assert!(report.is_clean());
}
